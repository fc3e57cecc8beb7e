//! Argument-checking helpers shared across primitive implementations.
//! Primitives receive already-evaluated `&[Expr]` slices (unlike the
//! evaluator's own special forms, which still see unevaluated children),
//! so every primitive starts by pulling typed arguments out of that slice.

use crate::error::EvalError;
use crate::expr::Expr;
use crate::list::List;
use crate::number::Number;

pub fn require_arity(name: &str, args: &[Expr], expected: usize) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(EvalError::arity_mismatch(name, expected, args.len()))
    }
}

pub fn require_min_arity(name: &str, args: &[Expr], min: usize) -> Result<(), EvalError> {
    if args.len() >= min {
        Ok(())
    } else {
        Err(EvalError::arity_mismatch(name, format!("at least {min}"), args.len()))
    }
}

pub fn require_arity_range(name: &str, args: &[Expr], min: usize, max: usize) -> Result<(), EvalError> {
    if args.len() >= min && args.len() <= max {
        Ok(())
    } else {
        Err(EvalError::arity_mismatch(
            name,
            format!("{min}..{max}"),
            args.len(),
        ))
    }
}

pub fn number_arg<'a>(name: &str, args: &'a [Expr], index: usize) -> Result<&'a Number, EvalError> {
    match &args[index] {
        Expr::Num(n) => Ok(n),
        other => Err(EvalError::type_mismatch(name, index + 1, "a number", other.type_name())),
    }
}

pub fn real_arg(name: &str, args: &[Expr], index: usize) -> Result<f64, EvalError> {
    let n = number_arg(name, args, index)?;
    n.to_f64()
        .ok_or_else(|| EvalError::type_mismatch(name, index + 1, "a real number", "a complex number"))
}

pub fn index_arg(name: &str, args: &[Expr], index: usize) -> Result<usize, EvalError> {
    let n = number_arg(name, args, index)?;
    n.to_i64()
        .filter(|i| *i >= 0)
        .and_then(|i| usize::try_from(i).ok())
        .ok_or_else(|| {
            EvalError::type_mismatch(name, index + 1, "a non-negative integer index", "a non-integer number")
        })
}

pub fn string_arg<'a>(name: &str, args: &'a [Expr], index: usize) -> Result<&'a str, EvalError> {
    match &args[index] {
        Expr::Str(s) => Ok(s),
        other => Err(EvalError::type_mismatch(name, index + 1, "a string", other.type_name())),
    }
}

pub fn char_arg(name: &str, args: &[Expr], index: usize) -> Result<char, EvalError> {
    match &args[index] {
        Expr::Char(c) => Ok(*c),
        other => Err(EvalError::type_mismatch(name, index + 1, "a character", other.type_name())),
    }
}

pub fn list_arg<'a>(name: &str, args: &'a [Expr], index: usize) -> Result<&'a List, EvalError> {
    match &args[index] {
        Expr::List(l) => Ok(l),
        other => Err(EvalError::type_mismatch(name, index + 1, "a list", other.type_name())),
    }
}

pub fn proper_list_arg<'a>(name: &str, args: &'a [Expr], index: usize) -> Result<&'a List, EvalError> {
    let list = list_arg(name, args, index)?;
    if list.is_proper() {
        Ok(list)
    } else {
        Err(EvalError::semantic(format!("{name}: argument {} is not a proper list", index + 1)))
    }
}

/// Converts a `Result<Number, &'static str>` produced by a fallible
/// `Number` operation into the spec's typed error kinds: messages that
/// mention "requires" name a type violation (non-real operand), anything
/// else (division by zero, NaN comparisons) is a domain violation.
pub fn numeric_result(
    name: &str,
    args: &[Expr],
    index: usize,
    result: Result<Number, &'static str>,
) -> Result<Expr, EvalError> {
    result.map(Expr::Num).map_err(|msg| {
        if msg.contains("requires") {
            EvalError::type_mismatch(name, index + 1, "a real number", args[index].type_name())
        } else {
            EvalError::domain(msg)
        }
    })
}
