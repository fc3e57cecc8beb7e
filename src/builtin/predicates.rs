//! `number? real? char? string? symbol? procedure?` (§4.3): structural
//! tests, never coercing.

use super::utils::require_arity;
use crate::error::EvalResult;
use crate::expr::Expr;

macro_rules! predicate {
    ($fn_name:ident, $prim:expr, $pattern:pat) => {
        pub fn $fn_name(args: &[Expr]) -> EvalResult {
            require_arity($prim, args, 1)?;
            Ok(Expr::Bool(matches!(&args[0], $pattern)))
        }
    };
}

predicate!(number_p, "number?", Expr::Num(_));
predicate!(char_p, "char?", Expr::Char(_));
predicate!(string_p, "string?", Expr::Str(_));
predicate!(symbol_p, "symbol?", Expr::Sym(_) | Expr::QuasiSym(_));
predicate!(procedure_p, "procedure?", Expr::Closure(_) | Expr::Primitive(_));

pub fn real_p(args: &[Expr]) -> EvalResult {
    require_arity("real?", args, 1)?;
    Ok(Expr::Bool(matches!(&args[0], Expr::Num(n) if n.is_real())))
}
