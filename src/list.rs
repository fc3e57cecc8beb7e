use crate::cons::{Cons, ConsCell};
use crate::expr::Expr;
use std::fmt;
use std::rc::Rc;

/// The dotted-pair list model of §3: either the single canonical empty
/// value or a handle to a shared, mutable cons cell. Cloning a `List`
/// clones the `Rc` handle, not the cell — aliases created by `cons`/
/// `car`/`cdr` keep pointing at the same cell, which is what lets
/// `set-car!`/`set-cdr!` be visible through every reference to it.
#[derive(Clone, Debug)]
pub enum List {
    Nil,
    Cons(ConsCell),
}

impl List {
    pub fn iter(&self) -> ListIter {
        ListIter {
            current: Expr::List(self.clone()),
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, List::Nil)
    }

    pub fn car(&self) -> Option<Expr> {
        match self {
            List::Cons(cell) => Some(cell.borrow().car.clone()),
            List::Nil => None,
        }
    }

    /// The raw tail of the first cell: any `Expr`, not necessarily another
    /// list (see `Cons::cdr`).
    pub fn cdr(&self) -> Option<Expr> {
        match self {
            List::Cons(cell) => Some(cell.borrow().cdr.clone()),
            List::Nil => None,
        }
    }

    /// A list is proper iff its cdr chain terminates in `Nil` without ever
    /// stepping onto a non-pair tail. Uses Floyd's cycle detection so a
    /// list cyclic through `set-cdr!` reports `false` instead of looping
    /// forever (§5: cycles are creatable and traversal must be bounded).
    pub fn is_proper(&self) -> bool {
        fn step(e: &Expr) -> Option<Expr> {
            match e {
                Expr::List(List::Cons(cell)) => Some(cell.borrow().cdr.clone()),
                _ => None,
            }
        }
        fn classify(e: &Expr) -> Option<bool> {
            match e {
                Expr::List(List::Nil) => Some(true),
                Expr::List(List::Cons(_)) => None,
                _ => Some(false),
            }
        }

        let mut slow = Expr::List(self.clone());
        let mut fast = Expr::List(self.clone());
        loop {
            if let Some(result) = classify(&fast) {
                return result;
            }
            let fast1 = step(&fast).expect("classify ruled out non-cons");
            if let Some(result) = classify(&fast1) {
                return result;
            }
            let fast2 = step(&fast1).expect("classify ruled out non-cons");
            slow = step(&slow).expect("slow trails fast, cdr must exist");
            fast = fast2;
            if let (Expr::List(List::Cons(a)), Expr::List(List::Cons(b))) = (&slow, &fast) {
                if Rc::ptr_eq(a, b) {
                    return false;
                }
            }
        }
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        crate::expr::equal(&Expr::List(self.clone()), &Expr::List(other.clone()))
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        let mut current = Expr::List(self.clone());
        let mut first = true;
        loop {
            match current {
                Expr::List(List::Nil) => break,
                Expr::List(List::Cons(cell)) => {
                    let cons = cell.borrow();
                    if first {
                        write!(f, "{}", cons.car)?;
                        first = false;
                    } else {
                        write!(f, " {}", cons.car)?;
                    }
                    let next = cons.cdr.clone();
                    drop(cons);
                    current = next;
                }
                other => {
                    write!(f, " . {other}")?;
                    break;
                }
            }
        }
        write!(f, ")")
    }
}

pub struct ListIter {
    current: Expr,
}

impl Iterator for ListIter {
    type Item = Expr;

    fn next(&mut self) -> Option<Self::Item> {
        match &self.current {
            Expr::List(List::Cons(cell)) => {
                let (car, cdr) = {
                    let cons = cell.borrow();
                    (cons.car.clone(), cons.cdr.clone())
                };
                self.current = cdr;
                Some(car)
            }
            _ => None,
        }
    }
}

pub fn cons(car: Expr, cdr: Expr) -> List {
    List::Cons(Cons::new_cell(car, cdr))
}

pub fn list(items: Vec<Expr>) -> List {
    let mut result = Expr::List(List::Nil);
    for item in items.into_iter().rev() {
        result = Expr::List(cons(item, result));
    }
    match result {
        Expr::List(list) => list,
        _ => unreachable!(),
    }
}

/// Lets the `list!` test macro accept both plain literals and nested
/// `list!` invocations as elements without the caller writing `Expr::from`
/// or `Expr::List` by hand.
pub trait IntoElem {
    fn into_elem(self) -> Expr;
}

impl IntoElem for Expr {
    fn into_elem(self) -> Expr {
        self
    }
}

impl IntoElem for List {
    fn into_elem(self) -> Expr {
        Expr::List(self)
    }
}

impl IntoElem for i32 {
    fn into_elem(self) -> Expr {
        Expr::from(self)
    }
}

impl IntoElem for f64 {
    fn into_elem(self) -> Expr {
        Expr::from(self)
    }
}

impl IntoElem for bool {
    fn into_elem(self) -> Expr {
        Expr::from(self)
    }
}

impl IntoElem for &str {
    fn into_elem(self) -> Expr {
        Expr::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::intern;
    use crate::macros::list as list_macro;

    #[test]
    fn test_display() {
        // Strings print without surrounding quotes (§6), same as `display`.
        let l = list_macro!(1, 2, list_macro!(3, "str", intern("sym")));
        assert_eq!(format!("{}", l), "(1 2 (3 str sym))");
    }

    #[test]
    fn test_dotted_display() {
        let l = cons(Expr::from(1), Expr::from(2));
        assert_eq!(format!("{l}"), "(1 . 2)");
    }

    #[test]
    fn test_iter() {
        let l = list_macro!(1, 2, 3);
        let mut iter = l.iter();
        assert_eq!(iter.next(), Some(Expr::from(1)));
        assert_eq!(iter.next(), Some(Expr::from(2)));
        assert_eq!(iter.next(), Some(Expr::from(3)));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_is_proper_detects_cycle() {
        let cell = Cons::new_cell(Expr::from(1), Expr::List(List::Nil));
        let looped = List::Cons(cell.clone());
        cell.borrow_mut().cdr = Expr::List(looped.clone());
        assert!(!looped.is_proper());
    }

    #[test]
    fn test_is_proper_false_for_dotted_pair() {
        let l = cons(Expr::from(1), Expr::from(2));
        assert!(!l.is_proper());
    }
}
