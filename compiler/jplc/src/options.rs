//! Execution options.

use jpl_eval::{Interpreter, DEFAULT_MAX_CALL_DEPTH};
use jpl_value::json::normalize;
use jpl_value::{Scope, Value};
use rustc_hash::FxHashMap;

/// Variables and limits shared by every run of a program.
#[derive(Clone, Debug)]
pub struct Options {
    /// Presets visible as variables in the root scope.
    pub vars: FxHashMap<String, Value>,
    /// Closure nesting allowed before a run fails with a stack overflow.
    pub max_call_depth: usize,
}

impl Options {
    pub fn new() -> Self {
        Options {
            vars: FxHashMap::default(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Preset a variable.
    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: Value) -> Self {
        self.vars.insert(name.into(), value);
        self
    }

    /// Preset a variable from host JSON.
    #[must_use]
    pub fn with_json_var(self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.with_var(name, normalize(value))
    }

    #[must_use]
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub(crate) fn interpreter(&self) -> Interpreter {
        Interpreter::builder()
            .max_call_depth(self.max_call_depth)
            .build()
    }

    pub(crate) fn scope(&self) -> Scope {
        Scope::with_presets(self.vars.clone())
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}
