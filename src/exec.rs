//! Top-level driver (§4.4): parses a whole unit of source text, then
//! evaluates its top-level forms one at a time against a shared
//! environment. A form's evaluation error is reported but does not stop
//! the remaining forms from running; a parse error, since it means the
//! text couldn't be read into forms at all, aborts the whole call.

use crate::env::Env;
use crate::error::{EvalError, ParseError};
use crate::eval::eval;
use crate::expr::Expr;
use crate::parser::parse;
use std::rc::Rc;

/// The outcome of evaluating one top-level form.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Value(Expr),
    Error(EvalError),
}

/// Parses `text` and evaluates every top-level form against `env`, in
/// source order, against the one environment (so a `define` in an
/// earlier form is visible to a later one). One `Outcome` comes back per
/// form; a form that errors doesn't prevent later forms from running,
/// matching a REPL's one-line-at-a-time behavior even when many forms
/// arrive in a single call.
pub fn exec(text: &str, env: &Rc<Env>) -> Result<Vec<Outcome>, ParseError> {
    let forms = match parse(text)? {
        Expr::Root(forms) => forms,
        other => vec![other],
    };

    Ok(forms
        .iter()
        .map(|form| match eval(form, env) {
            Ok(value) => Outcome::Value(value),
            Err(err) => Outcome::Error(err),
        })
        .collect())
}
