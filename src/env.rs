//! Lexical environments (§4.2): a chain of identifier→value frames. Each
//! frame is `RefCell<HashMap<_, _>>`, as in the teacher's `Env`, extended
//! with a `parent` link so closures and `let`/`letrec`/`do` can create
//! nested scopes — the teacher's `Env` never needed one because it only
//! ever had a single, global frame.

use crate::builtin;
use crate::error::EvalError;
use crate::expr::Expr;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug)]
pub struct Env {
    vars: RefCell<HashMap<String, Expr>>,
    parent: Option<Rc<Env>>,
}

impl Env {
    fn new(parent: Option<Rc<Env>>) -> Rc<Env> {
        Rc::new(Env {
            vars: RefCell::new(HashMap::new()),
            parent,
        })
    }

    /// The root environment, seeded with every primitive as an
    /// `Expr::Primitive` value (design notes §9: "eagerly seed the root
    /// environment" rather than falling back to a separate primitive
    /// table on lookup failure). This is what makes `(define f +)` then
    /// `(f 1 2)` work through plain variable lookup.
    pub fn new_root() -> Rc<Env> {
        let env = Env::new(None);
        builtin::seed(&env);
        env
    }

    pub fn new_child(parent: &Rc<Env>) -> Rc<Env> {
        Env::new(Some(parent.clone()))
    }

    /// Walks up to the ancestor with no parent. `eval` (§4.1 EVAL) re-enters
    /// a runtime-constructed datum in this environment, not the lexical one
    /// the `eval` form happened to be written in.
    pub fn root(env: &Rc<Env>) -> Rc<Env> {
        match &env.parent {
            Some(parent) => Env::root(parent),
            None => env.clone(),
        }
    }

    /// Walks the parent chain looking for `name`.
    pub fn lookup(&self, name: &str) -> Option<Expr> {
        if let Some(value) = self.vars.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|p| p.lookup(name))
    }

    /// Writes to the local frame unconditionally, shadowing any outer
    /// binding of the same name.
    pub fn bind(&self, name: &str, value: Expr) {
        self.vars.borrow_mut().insert(name.to_owned(), value);
    }

    /// `set!` semantics: mutate the nearest enclosing frame that already
    /// defines `name`. Errors if no frame in the chain defines it.
    pub fn assign(&self, name: &str, value: Expr) -> Result<(), EvalError> {
        if self.vars.borrow().contains_key(name) {
            self.vars.borrow_mut().insert(name.to_owned(), value);
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.assign(name, value),
            None => Err(EvalError::unbound_identifier(name)),
        }
    }

    /// Creates a child frame binding `params` positionally to `args`.
    /// Length mismatch is the caller's problem (§4.2: "arity check ... is
    /// a caller-level error, not an environment error"), so this takes
    /// already-length-checked slices.
    pub fn extend(parent: &Rc<Env>, params: &[String], args: Vec<Expr>) -> Rc<Env> {
        let child = Env::new_child(parent);
        for (name, value) in params.iter().zip(args) {
            child.bind(name, value);
        }
        child
    }
}
