//! Recursive-descent parser for JPL.
//!
//! Turns source text into a [`Pipeline`]. Tokenization is inline: the
//! [`cursor`] matches literals and character sets directly against the
//! source, skipping whitespace and comments after every match.
//!
//! # Precedence
//!
//! Loosest to tightest:
//!
//! | level | syntax |
//! |---|---|
//! | pipe | `a \| b` |
//! | output concat | `a, b` |
//! | try | `try a catch b` |
//! | or / and | `a or b`, `a and b` |
//! | equality | `a == b`, `a != b` |
//! | relational | `<`, `<=`, `>`, `>=` |
//! | not | `not a` |
//! | error suppression | `a?` |
//! | additive | `a + b`, `a - b` |
//! | multiplicative | `a * b`, `a / b`, `a % b` |
//! | null coalescence | `a ?? b` |
//! | negation | `-a` |
//! | primary | `if`, literals, functions, variables, `.`, constructors |

mod cursor;
mod error;
mod grammar;

pub use error::{ErrorContext, ParseError};

use jpl_ir::Pipeline;
use tracing::debug;

use crate::cursor::Cursor;

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    /// Create a parser over `source`.
    pub fn new(source: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(source),
        }
    }

    /// Parse a whole program. Anything but trailing whitespace and comments
    /// after the program is an error.
    pub fn parse_program(mut self) -> Result<Pipeline, ParseError> {
        self.cursor.skip_trivia()?;
        let pipe = self.parse_pipe()?;
        if !self.cursor.is_at_end() {
            return Err(self.cursor.error(ErrorContext::Program, "expected EOT"));
        }
        Ok(Pipeline::new(pipe))
    }
}

/// Parse JPL source into a pipeline.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str) -> Result<Pipeline, ParseError> {
    let result = Parser::new(source).parse_program();
    match &result {
        Ok(pipeline) => debug!(instructions = pipeline.len(), "parsed program"),
        Err(err) => debug!(%err, "syntax error"),
    }
    result
}

#[cfg(test)]
mod tests;
