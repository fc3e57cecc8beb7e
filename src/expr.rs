//! The value/AST model (§3). `Expr` is the single tagged representation
//! shared by parsed syntax and runtime values — evaluating a
//! self-evaluating node (a number, a string, ...) yields the node itself.
//! Node-kind names below follow spec §3 (`ROOT`, `SEQUENCE`, `COND`, ...)
//! mapped onto Rust's naming conventions (`Root`, `Sequence`, `Cond`, ...).

use crate::list::{self, List};
use crate::number::Number;
use crate::proc::Closure;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// One `cond`/`if` clause: `pred: None` marks the trailing `else` branch.
#[derive(Clone, Debug)]
pub struct CondClause {
    pub pred: Option<Expr>,
    pub conseq: Expr,
}

/// One `do`-loop variable: `(name init step)`.
#[derive(Clone, Debug)]
pub struct DoBinding {
    pub name: String,
    pub init: Expr,
    pub step: Expr,
}

#[derive(Clone, Debug)]
pub enum Expr {
    // -- self-evaluating data --
    Num(Number),
    Str(String),
    Bool(bool),
    Char(char),
    /// A quoted datum's identifier text. Not evaluated as a lookup; lists
    /// nested inside quoted data are literal `List` structure, never `Var`.
    Sym(String),
    /// Reserved: the kind quasiquote would tag a symbol with. MicroScheme's
    /// grammar (§6) has no `quasiquote`/`unquote`, so nothing ever
    /// constructs this variant; it exists to keep the node-kind set
    /// complete per §3.
    QuasiSym(String),
    List(List),
    Vector(Rc<RefCell<Vec<Expr>>>),

    // -- identifier reference --
    Var(String),

    // -- special forms --
    Root(Vec<Expr>),
    Sequence(Vec<Expr>),
    Cond(Vec<CondClause>),
    Lambda(Rc<crate::proc::LambdaNode>),
    Letrec(Vec<(String, Expr)>, Vec<Expr>),
    Set(String, Box<Expr>),
    SetCar(Box<Expr>, Box<Expr>),
    SetCdr(Box<Expr>, Box<Expr>),
    SetVector(Box<Expr>, Box<Expr>, Box<Expr>),
    Do(Vec<DoBinding>, Box<Expr>, Vec<Expr>, Vec<Expr>),
    Declaration(String, Box<Expr>),
    Application(Box<Expr>, Vec<Expr>),
    Apply(Box<Expr>, Box<Expr>),
    Eval(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),

    // -- runtime-only values --
    Closure(Rc<Closure>),
    Primitive(Rc<str>),
}

/// The canonical empty list. `Expr::List(List::Nil)` carries no payload,
/// so every value built this way already "is" the one empty list for
/// `eq?`'s purposes — no heap-allocated sentinel is needed.
pub const NIL: Expr = Expr::List(List::Nil);

pub fn intern(name: impl Into<String>) -> Expr {
    Expr::Sym(name.into())
}

impl Expr {
    pub fn is_atom(&self) -> bool {
        !matches!(self, Expr::List(List::Cons(_)))
    }

    /// Truthiness (§4.1): only the boolean `#f` is false.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Expr::Bool(false))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Expr::List(List::Nil))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Expr::Num(_) => "number",
            Expr::Str(_) => "string",
            Expr::Bool(_) => "boolean",
            Expr::Char(_) => "character",
            Expr::Sym(_) | Expr::QuasiSym(_) => "symbol",
            Expr::List(List::Nil) => "empty list",
            Expr::List(List::Cons(_)) => "pair",
            Expr::Vector(_) => "vector",
            Expr::Closure(_) | Expr::Primitive(_) => "procedure",
            _ => "expression",
        }
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Expr::Num(Number::from_real(value as f64))
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Num(Number::from_real(value))
    }
}

impl From<Number> for Expr {
    fn from(value: Number) -> Self {
        Expr::Num(value)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Expr::Bool(value)
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::Str(value.to_owned())
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Expr::Str(value)
    }
}

impl From<Vec<Expr>> for Expr {
    fn from(items: Vec<Expr>) -> Self {
        Expr::List(list::list(items))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(n) => write!(f, "{n}"),
            Expr::Str(s) => write!(f, "{s}"),
            Expr::Bool(true) => write!(f, "#t"),
            Expr::Bool(false) => write!(f, "#f"),
            Expr::Char(c) => write!(f, "{c}"),
            Expr::Sym(s) | Expr::QuasiSym(s) | Expr::Var(s) => write!(f, "{s}"),
            Expr::List(list) => write!(f, "{list}"),
            Expr::Vector(items) => {
                write!(f, "#(")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Expr::Closure(_) => write!(f, "#<procedure>"),
            Expr::Primitive(name) => write!(f, "#<procedure:{name}>"),
            _ => write!(f, "#<syntax>"),
        }
    }
}

/// Identity equality (`eq?`, §4.3): atoms compare by value, compound
/// values (pairs, vectors, closures) compare by the identity of their
/// shared heap allocation.
pub fn is_eq(a: &Expr, b: &Expr) -> bool {
    match (a, b) {
        (Expr::List(List::Nil), Expr::List(List::Nil)) => true,
        (Expr::List(List::Cons(x)), Expr::List(List::Cons(y))) => Rc::ptr_eq(x, y),
        (Expr::Vector(x), Expr::Vector(y)) => Rc::ptr_eq(x, y),
        (Expr::Closure(x), Expr::Closure(y)) => Rc::ptr_eq(x, y),
        (Expr::Num(x), Expr::Num(y)) => x == y,
        (Expr::Str(x), Expr::Str(y)) => x == y,
        (Expr::Bool(x), Expr::Bool(y)) => x == y,
        (Expr::Char(x), Expr::Char(y)) => x == y,
        (Expr::Sym(x), Expr::Sym(y)) | (Expr::Var(x), Expr::Var(y)) => x == y,
        (Expr::Primitive(x), Expr::Primitive(y)) => x == y,
        _ => false,
    }
}

/// Structural equality (`equal?`, §4.3). Recurses into pairs and vectors;
/// bounded by a depth counter so a cyclic list (buildable via `set-cdr!`)
/// reports `false` instead of recursing forever rather than relying on
/// Floyd's-cycle machinery on both operands at once.
pub fn equal(a: &Expr, b: &Expr) -> bool {
    equal_bounded(a, b, 1_000_000)
}

fn equal_bounded(a: &Expr, b: &Expr, fuel: usize) -> bool {
    if fuel == 0 {
        return false;
    }
    match (a, b) {
        (Expr::List(List::Nil), Expr::List(List::Nil)) => true,
        (Expr::List(List::Cons(x)), Expr::List(List::Cons(y))) => {
            if Rc::ptr_eq(x, y) {
                return true;
            }
            let (xb, yb) = (x.borrow(), y.borrow());
            equal_bounded(&xb.car, &yb.car, fuel - 1) && equal_bounded(&xb.cdr, &yb.cdr, fuel - 1)
        }
        (Expr::Vector(x), Expr::Vector(y)) => {
            if Rc::ptr_eq(x, y) {
                return true;
            }
            let (xb, yb) = (x.borrow(), y.borrow());
            xb.len() == yb.len()
                && xb
                    .iter()
                    .zip(yb.iter())
                    .all(|(a, b)| equal_bounded(a, b, fuel - 1))
        }
        _ => is_eq(a, b),
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        equal(self, other)
    }
}
