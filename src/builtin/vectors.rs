//! `vector vector-ref vector-length vector?` (§4.3). Index must be a real
//! integer in range.

use super::utils::{index_arg, require_arity};
use crate::error::{EvalError, EvalResult};
use crate::expr::Expr;
use std::cell::RefCell;
use std::rc::Rc;

pub fn vector(args: &[Expr]) -> EvalResult {
    Ok(Expr::Vector(Rc::new(RefCell::new(args.to_vec()))))
}

pub fn vector_ref(args: &[Expr]) -> EvalResult {
    require_arity("vector-ref", args, 2)?;
    let cells = vector_arg(args, 0)?;
    let i = index_arg("vector-ref", args, 1)?;
    let cells = cells.borrow();
    cells.get(i).cloned().ok_or_else(|| {
        EvalError::domain(format!(
            "vector-ref: index {i} out of range for a vector of length {}",
            cells.len()
        ))
    })
}

pub fn vector_length(args: &[Expr]) -> EvalResult {
    require_arity("vector-length", args, 1)?;
    let cells = vector_arg(args, 0)?;
    Ok(Expr::from(cells.borrow().len() as i32))
}

pub fn vector_p(args: &[Expr]) -> EvalResult {
    require_arity("vector?", args, 1)?;
    Ok(Expr::Bool(matches!(&args[0], Expr::Vector(_))))
}

fn vector_arg(args: &[Expr], index: usize) -> Result<Rc<RefCell<Vec<Expr>>>, EvalError> {
    match &args[index] {
        Expr::Vector(cells) => Ok(cells.clone()),
        other => Err(EvalError::type_mismatch("vector-ref", index + 1, "a vector", other.type_name())),
    }
}
