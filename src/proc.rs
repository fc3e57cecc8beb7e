//! Runtime procedure values: closures produced by `lambda`, and the
//! interned references to built-in primitives that `eval` resolves through
//! the primitive registry at application time.

use crate::env::Env;
use crate::expr::Expr;
use std::rc::Rc;

/// A `lambda` body: formal parameters plus an implicit-`begin` sequence of
/// body expressions. Shared (never mutated) between every closure produced
/// by evaluating the same `Expr::Lambda` node.
#[derive(Debug)]
pub struct LambdaNode {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: Vec<Expr>,
}

/// A closure: a lambda node paired with the environment visible at the
/// point the `lambda` form was evaluated (lexical capture, §3). Closures
/// are compared by identity, never structurally — two closures are `eq?`
/// only if they're the same `Rc`.
#[derive(Debug)]
pub struct Closure {
    pub node: Rc<LambdaNode>,
    pub env: Rc<Env>,
}

impl Closure {
    pub fn arity(&self) -> usize {
        self.node.params.len()
    }
}
