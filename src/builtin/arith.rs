//! `+ - * / ** log floor ceiling round truncate modulo remainder` (§4.3).

use super::utils::{number_arg, numeric_result, require_arity, require_min_arity};
use crate::error::EvalResult;
use crate::expr::Expr;
use crate::number::Number;

pub fn add(args: &[Expr]) -> EvalResult {
    let mut acc = Number::from_real(0.0);
    for i in 0..args.len() {
        acc = acc.add(number_arg("+", args, i)?);
    }
    Ok(Expr::Num(acc))
}

pub fn sub(args: &[Expr]) -> EvalResult {
    require_min_arity("-", args, 1)?;
    if args.len() == 1 {
        return Ok(Expr::Num(number_arg("-", args, 0)?.neg()));
    }
    let mut acc = number_arg("-", args, 0)?.clone();
    for i in 1..args.len() {
        acc = acc.sub(number_arg("-", args, i)?);
    }
    Ok(Expr::Num(acc))
}

pub fn mul(args: &[Expr]) -> EvalResult {
    let mut acc = Number::from_real(1.0);
    for i in 0..args.len() {
        acc = acc.mul(number_arg("*", args, i)?);
    }
    Ok(Expr::Num(acc))
}

pub fn div(args: &[Expr]) -> EvalResult {
    require_min_arity("/", args, 1)?;
    if args.len() == 1 {
        let n = number_arg("/", args, 0)?;
        return numeric_result("/", args, 0, Number::from_real(1.0).div(n));
    }
    let mut acc = number_arg("/", args, 0)?.clone();
    for i in 1..args.len() {
        let n = number_arg("/", args, i)?;
        let Expr::Num(next) = numeric_result("/", args, i, acc.div(n))? else {
            unreachable!()
        };
        acc = next;
    }
    Ok(Expr::Num(acc))
}

pub fn pow(args: &[Expr]) -> EvalResult {
    require_arity("**", args, 2)?;
    let base = number_arg("**", args, 0)?;
    let exponent = number_arg("**", args, 1)?;
    Ok(Expr::Num(base.pow(exponent)))
}

pub fn log(args: &[Expr]) -> EvalResult {
    require_arity("log", args, 1)?;
    Ok(Expr::Num(number_arg("log", args, 0)?.log()))
}

pub fn floor(args: &[Expr]) -> EvalResult {
    require_arity("floor", args, 1)?;
    numeric_result("floor", args, 0, number_arg("floor", args, 0)?.floor())
}

pub fn ceiling(args: &[Expr]) -> EvalResult {
    require_arity("ceiling", args, 1)?;
    numeric_result("ceiling", args, 0, number_arg("ceiling", args, 0)?.ceiling())
}

pub fn round(args: &[Expr]) -> EvalResult {
    require_arity("round", args, 1)?;
    numeric_result("round", args, 0, number_arg("round", args, 0)?.round())
}

pub fn truncate(args: &[Expr]) -> EvalResult {
    require_arity("truncate", args, 1)?;
    numeric_result("truncate", args, 0, number_arg("truncate", args, 0)?.truncate())
}

pub fn modulo(args: &[Expr]) -> EvalResult {
    require_arity("modulo", args, 2)?;
    let a = number_arg("modulo", args, 0)?;
    let b = number_arg("modulo", args, 1)?;
    numeric_result("modulo", args, 1, a.modulo(b))
}

pub fn remainder(args: &[Expr]) -> EvalResult {
    require_arity("remainder", args, 2)?;
    let a = number_arg("remainder", args, 0)?;
    let b = number_arg("remainder", args, 1)?;
    numeric_result("remainder", args, 1, a.remainder(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_sub() {
        assert_eq!(add(&[Expr::from(1), Expr::from(2), Expr::from(3)]).unwrap(), Expr::from(6));
        assert_eq!(sub(&[Expr::from(5)]).unwrap(), Expr::from(-5));
        assert_eq!(sub(&[Expr::from(5), Expr::from(2)]).unwrap(), Expr::from(3));
    }

    #[test]
    fn test_div_rejects_zero() {
        assert!(div(&[Expr::from(1), Expr::from(0)]).is_err());
    }

    #[test]
    fn test_modulo_keeps_divisor_sign() {
        let result = modulo(&[Expr::from(-7), Expr::from(3)]).unwrap();
        assert_eq!(result, Expr::from(2));
    }

    #[test]
    fn test_remainder_keeps_dividend_sign() {
        let result = remainder(&[Expr::from(-7), Expr::from(3)]).unwrap();
        assert_eq!(result, Expr::from(-1));
    }
}
