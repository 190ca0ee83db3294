#![allow(
    clippy::result_large_err,
    reason = "EvalError carries its payload value; boxing would ripple through every continuation"
)]
//! JPL Eval - continuation-passing evaluator for JPL pipelines.
//!
//! # Architecture
//!
//! Every instruction receives the rest of the computation as a callback
//! ([`Next`]) and calls it once per value it produces. The result of a call
//! is the flattened list of whatever the downstream continuation produced,
//! so multi-valued instructions branch the call tree instead of building
//! intermediate streams.
//!
//! - [`Interpreter`]: pipeline runner and instruction dispatch
//! - `exec`: per-instruction semantics (control flow, access, assignment,
//!   constructors)
//! - [`evaluate_arithmetic`] / [`evaluate_comparison`]: binary operators
//! - [`evaluate_negation`] / [`evaluate_not`]: unary operators
//!
//! Values, scopes and errors live in `jpl_value` and are re-exported here.

mod exec;
pub mod interpreter;
mod operators;
mod unary_operators;

pub use interpreter::{Interpreter, InterpreterBuilder, Next, DEFAULT_MAX_CALL_DEPTH};
pub use operators::{evaluate_arithmetic, evaluate_comparison};
pub use unary_operators::{evaluate_negation, evaluate_not};

pub use jpl_value::{EvalError, EvalErrorKind, EvalResult, FunctionValue, Invoker, Scope, Value};

#[cfg(test)]
mod tests;
