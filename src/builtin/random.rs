//! `random random-integer random-double random-set-seed!` (§4.3). One
//! shared process-wide generator, thread-local since the evaluator is
//! single-threaded (§5).

use super::utils::{number_arg, require_arity, require_arity_range};
use crate::error::{EvalError, EvalResult};
use crate::expr::Expr;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;

thread_local! {
    static RNG: RefCell<StdRng> = RefCell::new(StdRng::from_entropy());
}

/// `(random n)`: an integer in `[0, n)`, matching the common Scheme
/// shorthand alongside the more explicit `random-integer`/`random-double`.
pub fn random(args: &[Expr]) -> EvalResult {
    require_arity("random", args, 1)?;
    let bound = number_arg("random", args, 0)?
        .to_i64()
        .ok_or_else(|| EvalError::type_mismatch("random", 1, "an integer", "a non-integer number"))?;
    if bound <= 0 {
        return Err(EvalError::domain("random: bound must be positive"));
    }
    let value = RNG.with(|rng| rng.borrow_mut().gen_range(0..bound));
    Ok(Expr::from(value as f64))
}

/// `(random-integer lo hi)`: inclusive on both ends.
pub fn random_integer(args: &[Expr]) -> EvalResult {
    require_arity("random-integer", args, 2)?;
    let lo = number_arg("random-integer", args, 0)?
        .to_i64()
        .ok_or_else(|| EvalError::type_mismatch("random-integer", 1, "an integer", "a non-integer number"))?;
    let hi = number_arg("random-integer", args, 1)?
        .to_i64()
        .ok_or_else(|| EvalError::type_mismatch("random-integer", 2, "an integer", "a non-integer number"))?;
    if lo > hi {
        return Err(EvalError::domain("random-integer: lower bound exceeds upper bound"));
    }
    let value = RNG.with(|rng| rng.borrow_mut().gen_range(lo..=hi));
    Ok(Expr::from(value as f64))
}

pub fn random_double(args: &[Expr]) -> EvalResult {
    require_arity_range("random-double", args, 0, 0)?;
    let value: f64 = RNG.with(|rng| rng.borrow_mut().gen());
    Ok(Expr::from(value))
}

pub fn random_set_seed(args: &[Expr]) -> EvalResult {
    require_arity("random-set-seed!", args, 1)?;
    let seed = number_arg("random-set-seed!", args, 0)?
        .to_i64()
        .ok_or_else(|| EvalError::type_mismatch("random-set-seed!", 1, "an integer", "a non-integer number"))?;
    RNG.with(|rng| *rng.borrow_mut() = StdRng::seed_from_u64(seed as u64));
    Ok(Expr::Bool(true))
}
