//! `< <= > >= =` (§4.3). Ordering requires real operands; `=` compares
//! both real and imaginary components and never coerces.

use super::utils::{number_arg, require_min_arity};
use crate::error::{EvalError, EvalResult};
use crate::expr::Expr;
use std::cmp::Ordering;

fn compare_chain(name: &str, args: &[Expr], holds: impl Fn(Ordering) -> bool) -> EvalResult {
    require_min_arity(name, args, 1)?;
    for i in 0..args.len().saturating_sub(1) {
        let a = number_arg(name, args, i)?;
        let b = number_arg(name, args, i + 1)?;
        let ordering = a
            .compare(b)
            .map_err(|_| EvalError::type_mismatch(name, i + 1, "a real number", "a complex number"))?;
        if !holds(ordering) {
            return Ok(Expr::Bool(false));
        }
    }
    Ok(Expr::Bool(true))
}

pub fn lt(args: &[Expr]) -> EvalResult {
    compare_chain("<", args, |o| o == Ordering::Less)
}

pub fn le(args: &[Expr]) -> EvalResult {
    compare_chain("<=", args, |o| o != Ordering::Greater)
}

pub fn gt(args: &[Expr]) -> EvalResult {
    compare_chain(">", args, |o| o == Ordering::Greater)
}

pub fn ge(args: &[Expr]) -> EvalResult {
    compare_chain(">=", args, |o| o != Ordering::Less)
}

pub fn num_eq(args: &[Expr]) -> EvalResult {
    require_min_arity("=", args, 1)?;
    let first = number_arg("=", args, 0)?;
    for i in 1..args.len() {
        if !first.eq_value(number_arg("=", args, i)?) {
            return Ok(Expr::Bool(false));
        }
    }
    Ok(Expr::Bool(true))
}
