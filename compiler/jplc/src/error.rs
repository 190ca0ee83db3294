//! Unified error for the public entry points.

use jpl_parse::ParseError;
use jpl_value::EvalError;

/// Anything that can go wrong between source text and output values.
#[derive(Clone, Debug, thiserror::Error)]
pub enum JplError {
    /// The program does not parse.
    #[error("syntax error: {0}")]
    Syntax(#[from] ParseError),
    /// Evaluation failed, including host boundary violations.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl JplError {
    /// Returns `true` for fatal evaluation errors.
    pub fn is_fatal(&self) -> bool {
        matches!(self, JplError::Eval(err) if err.is_fatal())
    }

    /// One-based line and column of a syntax error in `source`.
    pub fn location(&self, source: &str) -> Option<(usize, usize)> {
        match self {
            JplError::Syntax(err) => Some(err.location(source)),
            JplError::Eval(_) => None,
        }
    }
}
