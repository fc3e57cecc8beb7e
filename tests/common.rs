use microscheme::{eval, Env};
use std::rc::Rc;

/// Parses and evaluates `text` against a fresh root environment, returning
/// its printed form (or `"Err: ..."` on an evaluation error), mirroring the
/// shape of `exec`'s per-form `Outcome` without pulling in the whole driver.
pub fn eval_str(text: &str) -> String {
    eval_str_env(text, &Env::new_root())
}

/// Same as `eval_str`, but against a caller-supplied environment so tests
/// can check that a `define` in one call is visible to the next.
pub fn eval_str_env(text: &str, env: &Rc<Env>) -> String {
    let root = microscheme::parse(text).unwrap_or_else(|e| panic!("failed to parse {text:?}: {e}"));
    let microscheme::Expr::Root(forms) = root else {
        panic!("parse of {text:?} did not produce a Root");
    };
    let mut last = None;
    for form in &forms {
        last = Some(eval(form, env));
    }
    match last.expect("no forms to evaluate") {
        Ok(value) => value.to_string(),
        Err(error) => format!("Err: {error}"),
    }
}
