//! Evaluation errors (§7). `EvalError` is a plain struct with a manual
//! `Display` impl, matching the teacher crate's hand-rolled error types —
//! no `thiserror`/`anyhow`, since the library has no other dependencies
//! to justify pulling one in.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    UnboundIdentifier,
    ArityMismatch,
    TypeMismatch,
    DomainError,
    SemanticError,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub message: String,
}

pub type EvalResult = Result<crate::expr::Expr, EvalError>;

impl EvalError {
    pub fn unbound_identifier(name: &str) -> Self {
        EvalError {
            kind: EvalErrorKind::UnboundIdentifier,
            message: format!("unbound identifier: {name}"),
        }
    }

    pub fn arity_mismatch(callee: &str, expected: impl fmt::Display, got: usize) -> Self {
        EvalError {
            kind: EvalErrorKind::ArityMismatch,
            message: format!("{callee}: expected {expected} argument(s), got {got}"),
        }
    }

    pub fn type_mismatch(
        callee: &str,
        position: usize,
        expected: &str,
        actual: impl fmt::Display,
    ) -> Self {
        EvalError {
            kind: EvalErrorKind::TypeMismatch,
            message: format!(
                "{callee}: argument {position} must be {expected}, got {actual}"
            ),
        }
    }

    pub fn domain(message: impl Into<String>) -> Self {
        EvalError {
            kind: EvalErrorKind::DomainError,
            message: message.into(),
        }
    }

    pub fn semantic(message: impl Into<String>) -> Self {
        EvalError {
            kind: EvalErrorKind::SemanticError,
            message: message.into(),
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Produced by the lexer/parser boundary (§6/§7); the driver reports it
/// and skips evaluation of the offending top-level form.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseError {
    UnexpectedToken(String),
    IncompleteExpr,
    InvalidNumber(String),
    IncompleteString,
    UnexpectedCloseParen,
    /// A recognized special form with the wrong shape, e.g. `(lambda 1 2)`.
    MalformedForm(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken(token) => write!(f, "unexpected token: {token}"),
            ParseError::IncompleteExpr => write!(f, "incomplete expression"),
            ParseError::InvalidNumber(text) => write!(f, "invalid number: {text}"),
            ParseError::IncompleteString => write!(f, "incomplete string"),
            ParseError::UnexpectedCloseParen => write!(f, "unexpected `)`"),
            ParseError::MalformedForm(detail) => write!(f, "ill-formed special form: {detail}"),
        }
    }
}

impl From<crate::lexer::LexError> for ParseError {
    fn from(err: crate::lexer::LexError) -> Self {
        let message = err.to_string();
        match err {
            crate::lexer::LexError::IncompleteString => ParseError::IncompleteString,
            crate::lexer::LexError::InvalidNumber => ParseError::InvalidNumber(message),
            crate::lexer::LexError::UnknownHashLiteral(text) => ParseError::UnexpectedToken(text),
        }
    }
}
