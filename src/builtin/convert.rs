//! `number->string string->number list->string string->list` (§4.3).
//! `list->string` requires character elements and a proper list.
//!
//! §9 resolves an open question in the source material: `string->number`
//! parses its argument, returning `#f` on failure, rather than returning
//! the string unchanged.

use super::utils::{proper_list_arg, require_arity, string_arg};
use crate::error::{EvalError, EvalResult};
use crate::expr::Expr;
use crate::list;
use crate::number::Number;

pub fn number_to_string(args: &[Expr]) -> EvalResult {
    require_arity("number->string", args, 1)?;
    match &args[0] {
        Expr::Num(n) => Ok(Expr::Str(n.to_string())),
        other => Err(EvalError::type_mismatch("number->string", 1, "a number", other.type_name())),
    }
}

pub fn string_to_number(args: &[Expr]) -> EvalResult {
    require_arity("string->number", args, 1)?;
    let s = string_arg("string->number", args, 0)?;
    match Number::parse(s) {
        Some(n) => Ok(Expr::Num(n)),
        None => Ok(Expr::Bool(false)),
    }
}

pub fn list_to_string(args: &[Expr]) -> EvalResult {
    require_arity("list->string", args, 1)?;
    let list = proper_list_arg("list->string", args, 0)?;
    let mut out = String::new();
    for item in list.iter() {
        match item {
            Expr::Char(c) => out.push(c),
            other => return Err(EvalError::type_mismatch("list->string", 1, "a list of characters", other.type_name())),
        }
    }
    Ok(Expr::Str(out))
}

pub fn string_to_list(args: &[Expr]) -> EvalResult {
    require_arity("string->list", args, 1)?;
    let s = string_arg("string->list", args, 0)?;
    Ok(Expr::List(list::list(s.chars().map(Expr::Char).collect())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_string_list() {
        let s = Expr::from("hi");
        let as_list = string_to_list(&[s.clone()]).unwrap();
        let back = list_to_string(&[as_list]).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_string_to_number_failure_is_false() {
        assert_eq!(string_to_number(&[Expr::from("not-a-number")]).unwrap(), Expr::Bool(false));
    }
}
