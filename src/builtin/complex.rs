//! `real-part`/`imag-part` (§4.3): return a component as a real number.

use super::utils::{number_arg, require_arity};
use crate::error::EvalResult;
use crate::expr::Expr;

pub fn real_part(args: &[Expr]) -> EvalResult {
    require_arity("real-part", args, 1)?;
    Ok(Expr::Num(number_arg("real-part", args, 0)?.real_part()))
}

pub fn imag_part(args: &[Expr]) -> EvalResult {
    require_arity("imag-part", args, 1)?;
    Ok(Expr::Num(number_arg("imag-part", args, 0)?.imag_part()))
}
