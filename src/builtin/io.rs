//! `display`, `displayln`, `printf` (§6: printed forms; §4.3 I/O row).

use super::utils::{require_min_arity, string_arg};
use crate::error::{EvalError, EvalResult};
use crate::expr::Expr;

pub fn display(args: &[Expr]) -> EvalResult {
    require_min_arity("display", args, 1)?;
    print!("{}", args[0]);
    Ok(Expr::Bool(true))
}

pub fn displayln(args: &[Expr]) -> EvalResult {
    require_min_arity("displayln", args, 1)?;
    println!("{}", args[0]);
    Ok(Expr::Bool(true))
}

/// `~s`/`~d`/`~l` print the argument generically, `~x`/`~o`/`~b` print the
/// real part's integer value in radix 16/8/2, `~g` prints a boolean as
/// `#t`/`#f`, `~c` a raw character, `~y` a symbol's text.
pub fn printf(args: &[Expr]) -> EvalResult {
    require_min_arity("printf", args, 1)?;
    let fmt = string_arg("printf", args, 0)?;
    let mut rest = args[1..].iter();
    let mut out = String::new();
    let mut chars = fmt.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        let directive = chars
            .next()
            .ok_or_else(|| EvalError::semantic("printf: dangling `~` at end of format string"))?;
        if directive == '~' {
            out.push('~');
            continue;
        }
        let value = rest.next().ok_or_else(|| {
            EvalError::arity_mismatch("printf", "one argument per format directive", args.len() - 1)
        })?;
        render_directive(directive, value, &mut out)?;
    }

    print!("{out}");
    Ok(Expr::Bool(true))
}

fn render_directive(directive: char, value: &Expr, out: &mut String) -> Result<(), EvalError> {
    match directive.to_ascii_lowercase() {
        's' | 'd' | 'l' => out.push_str(&value.to_string()),
        'y' => out.push_str(&value.to_string()),
        'g' => match value {
            Expr::Bool(b) => out.push_str(if *b { "#t" } else { "#f" }),
            other => out.push_str(&other.to_string()),
        },
        'c' => match value {
            Expr::Char(ch) => out.push(*ch),
            other => out.push_str(&other.to_string()),
        },
        'x' | 'o' | 'b' => out.push_str(&radix_digits(directive, value)?),
        other => return Err(EvalError::semantic(format!("printf: unknown directive ~{other}"))),
    }
    Ok(())
}

fn radix_digits(directive: char, value: &Expr) -> Result<String, EvalError> {
    let Expr::Num(n) = value else {
        return Err(EvalError::type_mismatch("printf", 0, "a number", value.type_name()));
    };
    let i = n
        .to_i64()
        .ok_or_else(|| EvalError::type_mismatch("printf", 0, "an integer", "a non-integer number"))?;
    let (sign, magnitude) = if i < 0 { ("-", i.unsigned_abs()) } else { ("", i as u64) };
    let digits = match directive.to_ascii_lowercase() {
        'x' => format!("{magnitude:x}"),
        'o' => format!("{magnitude:o}"),
        'b' => format!("{magnitude:b}"),
        _ => unreachable!(),
    };
    Ok(format!("{sign}{digits}"))
}
