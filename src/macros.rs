/// Builds a `List` from a comma-separated element list, converting each
/// element through `IntoElem` so literals, `Expr`s, and nested `list!`
/// calls can all appear as elements directly.
#[macro_export]
macro_rules! list {
    () => {
        $crate::list::List::Nil
    };

    ($car:expr $(, $cdr:expr)* $(,)?) => {
        $crate::list::cons(
            $crate::list::IntoElem::into_elem($car),
            $crate::expr::Expr::List($crate::list!($($cdr),*)),
        )
    };
}

pub(crate) use list;
