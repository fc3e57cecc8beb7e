//! MicroScheme is a small, arbitrary-precision Scheme-subset interpreter
//! (§1-§2). It exposes a tree-walking evaluator over a single `Expr`
//! value/AST representation: parse source text with [`parser::parse`],
//! seed a root environment with [`Env::new_root`], and run the result
//! through [`eval::eval`]. [`exec::exec`] wires those three calls into the
//! top-level driver the CLI binary uses.

mod builtin;
mod cons;
mod macros;

pub mod env;
pub mod error;
pub mod eval;
pub mod exec;
pub mod expr;
pub mod lexer;
pub mod list;
pub mod number;
pub mod parser;
pub mod proc;
pub mod span;
pub mod token;

// Re-export public APIs
pub use env::Env;
pub use error::{EvalError, EvalErrorKind, EvalResult, ParseError};
pub use eval::{apply, eval};
pub use exec::{exec, Outcome};
pub use expr::{intern, Expr, NIL};
pub use lexer::{tokenize, LexError, Lexer};
pub use list::{cons, List, ListIter};
pub use number::Number;
pub use parser::{parse, Parser};
pub use proc::{Closure, LambdaNode};
pub use span::{Loc, Span};
pub use token::Token;
