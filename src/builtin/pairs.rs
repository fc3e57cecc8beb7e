//! `cons list car cdr null? pair? list?` (§4.3). `car`/`cdr` reject the
//! empty list; `list?` holds iff the argument is a proper list.

use super::utils::{list_arg, require_arity};
use crate::error::{EvalError, EvalResult};
use crate::expr::Expr;
use crate::list::{self, List};

pub fn cons(args: &[Expr]) -> EvalResult {
    require_arity("cons", args, 2)?;
    Ok(Expr::List(list::cons(args[0].clone(), args[1].clone())))
}

pub fn list(args: &[Expr]) -> EvalResult {
    Ok(Expr::List(list::list(args.to_vec())))
}

pub fn car(args: &[Expr]) -> EvalResult {
    require_arity("car", args, 1)?;
    let list = list_arg("car", args, 0)?;
    list.car().ok_or_else(|| EvalError::domain("car: the empty list has no car"))
}

pub fn cdr(args: &[Expr]) -> EvalResult {
    require_arity("cdr", args, 1)?;
    let list = list_arg("cdr", args, 0)?;
    list.cdr().ok_or_else(|| EvalError::domain("cdr: the empty list has no cdr"))
}

pub fn null_p(args: &[Expr]) -> EvalResult {
    require_arity("null?", args, 1)?;
    Ok(Expr::Bool(matches!(&args[0], Expr::List(List::Nil))))
}

pub fn pair_p(args: &[Expr]) -> EvalResult {
    require_arity("pair?", args, 1)?;
    Ok(Expr::Bool(matches!(&args[0], Expr::List(List::Cons(_)))))
}

pub fn list_p(args: &[Expr]) -> EvalResult {
    require_arity("list?", args, 1)?;
    Ok(Expr::Bool(match &args[0] {
        Expr::List(l) => l.is_proper(),
        _ => false,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_cdr() {
        let l = list(&[Expr::from(1), Expr::from(2)]).unwrap();
        assert_eq!(car(&[l.clone()]).unwrap(), Expr::from(1));
        assert_eq!(cdr(&[l]).unwrap(), Expr::List(list::list(vec![Expr::from(2)])));
    }

    #[test]
    fn test_car_of_empty_errors() {
        assert!(car(&[Expr::List(List::Nil)]).is_err());
    }

    #[test]
    fn test_list_p() {
        let proper = list(&[Expr::from(1)]).unwrap();
        assert_eq!(list_p(&[proper]).unwrap(), Expr::Bool(true));
        let dotted = Expr::List(list::cons(Expr::from(1), Expr::from(2)));
        assert_eq!(list_p(&[dotted]).unwrap(), Expr::Bool(false));
    }
}
