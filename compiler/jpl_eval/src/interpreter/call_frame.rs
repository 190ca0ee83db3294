//! RAII guard for the closure call depth.
//!
//! Entering a call bumps the interpreter's depth counter and returns a
//! [`CallFrame`]; dropping the frame (including on early `?` returns)
//! restores it.

use std::cell::Cell;

use jpl_value::{stack_overflow, EvalResult};

use super::Interpreter;

pub(crate) struct CallFrame<'i> {
    depth: &'i Cell<usize>,
}

impl Drop for CallFrame<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

impl Interpreter {
    /// Enter one level of closure nesting, or fail with a fatal stack
    /// overflow once the configured limit is reached.
    pub(crate) fn enter_call(&self) -> EvalResult<CallFrame<'_>> {
        let depth = self.call_depth.get();
        if depth >= self.max_call_depth {
            return Err(stack_overflow(self.max_call_depth));
        }
        self.call_depth.set(depth + 1);
        Ok(CallFrame {
            depth: &self.call_depth,
        })
    }

    /// Current closure nesting depth.
    pub fn call_depth(&self) -> usize {
        self.call_depth.get()
    }
}
