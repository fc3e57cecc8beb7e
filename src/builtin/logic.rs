//! `not equal? eq?` (§4.3).

use super::utils::require_arity;
use crate::error::EvalResult;
use crate::expr::{self, Expr};

pub fn not(args: &[Expr]) -> EvalResult {
    require_arity("not", args, 1)?;
    Ok(Expr::Bool(!args[0].is_truthy()))
}

pub fn equal_p(args: &[Expr]) -> EvalResult {
    require_arity("equal?", args, 2)?;
    Ok(Expr::Bool(expr::equal(&args[0], &args[1])))
}

pub fn eq_p(args: &[Expr]) -> EvalResult {
    require_arity("eq?", args, 2)?;
    Ok(Expr::Bool(expr::is_eq(&args[0], &args[1])))
}
