//! `sin cos tan sinh cosh tanh` and their inverses (§4.3). Complex-capable
//! where `Number` supports it; `asinh`/`acosh`/`atanh` require real input.

use super::utils::{number_arg, numeric_result, require_arity};
use crate::error::EvalResult;
use crate::expr::Expr;

macro_rules! unary_transcendental {
    ($fn_name:ident, $prim:expr, $method:ident) => {
        pub fn $fn_name(args: &[Expr]) -> EvalResult {
            require_arity($prim, args, 1)?;
            Ok(Expr::Num(number_arg($prim, args, 0)?.$method()))
        }
    };
}

unary_transcendental!(sin, "sin", sin);
unary_transcendental!(cos, "cos", cos);
unary_transcendental!(tan, "tan", tan);
unary_transcendental!(sinh, "sinh", sinh);
unary_transcendental!(cosh, "cosh", cosh);
unary_transcendental!(tanh, "tanh", tanh);
unary_transcendental!(asin, "asin", asin);
unary_transcendental!(acos, "acos", acos);
unary_transcendental!(atan, "atan", atan);

pub fn asinh(args: &[Expr]) -> EvalResult {
    require_arity("asinh", args, 1)?;
    numeric_result("asinh", args, 0, number_arg("asinh", args, 0)?.asinh())
}

pub fn acosh(args: &[Expr]) -> EvalResult {
    require_arity("acosh", args, 1)?;
    numeric_result("acosh", args, 0, number_arg("acosh", args, 0)?.acosh())
}

pub fn atanh(args: &[Expr]) -> EvalResult {
    require_arity("atanh", args, 1)?;
    numeric_result("atanh", args, 0, number_arg("atanh", args, 0)?.atanh())
}
