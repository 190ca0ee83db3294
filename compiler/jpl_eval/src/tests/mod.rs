//! Evaluator tests, grouped by instruction family.
//!
//! Programs are parsed from source and run against JSON inputs, so the
//! expectations read like the language itself.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod access_tests;
mod operators_tests;

use jpl_value::json::{normalize, strip_values};
use jpl_value::{EvalError, Scope};

use crate::Interpreter;

/// Parse and run `source` with a given interpreter and root scope.
pub(crate) fn try_eval_with(
    interpreter: &Interpreter,
    source: &str,
    input: serde_json::Value,
    scope: &Scope,
) -> Result<Vec<serde_json::Value>, EvalError> {
    let pipeline = jpl_parse::parse(source).unwrap_or_else(|err| panic!("{source}: {err}"));
    let outputs = interpreter.evaluate(&pipeline, normalize(input), scope)?;
    strip_values(&outputs)
}

pub(crate) fn try_eval(source: &str, input: serde_json::Value) -> Result<Vec<serde_json::Value>, EvalError> {
    try_eval_with(&Interpreter::new(), source, input, &Scope::new())
}

#[track_caller]
pub(crate) fn eval(source: &str, input: serde_json::Value) -> Vec<serde_json::Value> {
    try_eval(source, input).unwrap_or_else(|err| panic!("{source}: {err}"))
}

#[track_caller]
pub(crate) fn eval_err(source: &str, input: serde_json::Value) -> EvalError {
    match try_eval(source, input) {
        Ok(outputs) => panic!("{source}: expected an error, got {outputs:?}"),
        Err(err) => err,
    }
}
