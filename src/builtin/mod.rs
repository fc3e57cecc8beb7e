//! The primitive registry (§4.3): every built-in procedure, keyed by name.
//! `seed` installs each one into the root environment as an
//! `Expr::Primitive` value (design notes §9), and `dispatch` is what
//! `eval::apply` calls once it has resolved an operator to one of those
//! values and evaluated the argument list.

mod arith;
mod chars;
mod cmp;
mod complex;
mod convert;
mod io;
mod logic;
mod pairs;
mod predicates;
mod random;
mod strings;
mod trans;
mod utils;
mod vectors;

use crate::env::Env;
use crate::error::{EvalError, EvalResult};
use crate::expr::Expr;
use std::rc::Rc;

/// Every primitive name, in the order primitives are seeded. Shared
/// between `seed` (so the root environment carries each one) and
/// `dispatch` (so application can reach it by name).
const NAMES: &[&str] = &[
    "display", "displayln", "printf", "+", "-", "*", "/", "**", "log", "floor", "ceiling",
    "round", "truncate", "modulo", "remainder", "sin", "cos", "tan", "sinh", "cosh", "tanh",
    "asin", "acos", "atan", "asinh", "acosh", "atanh", "<", "<=", ">", ">=", "=", "real-part",
    "imag-part", "not", "equal?", "eq?", "cons", "list", "car", "cdr", "null?", "pair?", "list?",
    "vector", "vector-ref", "vector-length", "vector?", "number?", "real?", "char?", "string?",
    "symbol?", "procedure?", "string-append", "string-length", "string<?", "string<=?",
    "string>?", "string>=?", "substring", "char<?", "char<=?", "char>?", "char>=?",
    "number->string", "string->number", "list->string", "string->list", "random",
    "random-integer", "random-double", "random-set-seed!",
];

pub fn seed(env: &Rc<Env>) {
    for name in NAMES {
        env.bind(name, Expr::Primitive(Rc::from(*name)));
    }
}

pub fn dispatch(name: &str, args: &[Expr]) -> EvalResult {
    match name {
        "display" => io::display(args),
        "displayln" => io::displayln(args),
        "printf" => io::printf(args),

        "+" => arith::add(args),
        "-" => arith::sub(args),
        "*" => arith::mul(args),
        "/" => arith::div(args),
        "**" => arith::pow(args),
        "log" => arith::log(args),
        "floor" => arith::floor(args),
        "ceiling" => arith::ceiling(args),
        "round" => arith::round(args),
        "truncate" => arith::truncate(args),
        "modulo" => arith::modulo(args),
        "remainder" => arith::remainder(args),

        "sin" => trans::sin(args),
        "cos" => trans::cos(args),
        "tan" => trans::tan(args),
        "sinh" => trans::sinh(args),
        "cosh" => trans::cosh(args),
        "tanh" => trans::tanh(args),
        "asin" => trans::asin(args),
        "acos" => trans::acos(args),
        "atan" => trans::atan(args),
        "asinh" => trans::asinh(args),
        "acosh" => trans::acosh(args),
        "atanh" => trans::atanh(args),

        "<" => cmp::lt(args),
        "<=" => cmp::le(args),
        ">" => cmp::gt(args),
        ">=" => cmp::ge(args),
        "=" => cmp::num_eq(args),

        "real-part" => complex::real_part(args),
        "imag-part" => complex::imag_part(args),

        "not" => logic::not(args),
        "equal?" => logic::equal_p(args),
        "eq?" => logic::eq_p(args),

        "cons" => pairs::cons(args),
        "list" => pairs::list(args),
        "car" => pairs::car(args),
        "cdr" => pairs::cdr(args),
        "null?" => pairs::null_p(args),
        "pair?" => pairs::pair_p(args),
        "list?" => pairs::list_p(args),

        "vector" => vectors::vector(args),
        "vector-ref" => vectors::vector_ref(args),
        "vector-length" => vectors::vector_length(args),
        "vector?" => vectors::vector_p(args),

        "number?" => predicates::number_p(args),
        "real?" => predicates::real_p(args),
        "char?" => predicates::char_p(args),
        "string?" => predicates::string_p(args),
        "symbol?" => predicates::symbol_p(args),
        "procedure?" => predicates::procedure_p(args),

        "string-append" => strings::string_append(args),
        "string-length" => strings::string_length(args),
        "string<?" => strings::lt(args),
        "string<=?" => strings::le(args),
        "string>?" => strings::gt(args),
        "string>=?" => strings::ge(args),
        "substring" => strings::substring(args),

        "char<?" => chars::lt(args),
        "char<=?" => chars::le(args),
        "char>?" => chars::gt(args),
        "char>=?" => chars::ge(args),

        "number->string" => convert::number_to_string(args),
        "string->number" => convert::string_to_number(args),
        "list->string" => convert::list_to_string(args),
        "string->list" => convert::string_to_list(args),

        "random" => random::random(args),
        "random-integer" => random::random_integer(args),
        "random-double" => random::random_double(args),
        "random-set-seed!" => random::random_set_seed(args),

        other => Err(EvalError::semantic(format!("unknown primitive: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::apply;

    #[test]
    fn test_seed_installs_every_name() {
        let env = Env::new_root();
        for name in NAMES {
            assert!(env.lookup(name).is_some(), "missing primitive {name}");
        }
    }

    #[test]
    fn test_apply_through_primitive_value() {
        let env = Env::new_root();
        let plus = env.lookup("+").unwrap();
        let result = apply(&plus, vec![Expr::from(1), Expr::from(2)]).unwrap();
        assert_eq!(result, Expr::from(3));
    }
}
