//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use std::cell::Cell;

use super::Interpreter;

/// Closure nesting allowed before evaluation fails with a stack overflow.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 4096;

/// Builder for creating Interpreter instances.
#[derive(Clone, Debug)]
pub struct InterpreterBuilder {
    max_call_depth: usize,
}

impl InterpreterBuilder {
    /// Create a new builder with default limits.
    pub fn new() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Set how deeply closure calls may nest.
    ///
    /// Exceeding the limit is a fatal error, so runaway recursion cannot be
    /// caught by `try`.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter {
        Interpreter {
            max_call_depth: self.max_call_depth,
            call_depth: Cell::new(0),
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
