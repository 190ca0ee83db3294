#![allow(
    clippy::result_large_err,
    reason = "EvalError carries its payload value; boxing would ripple through every continuation"
)]
//! JPL values - the runtime universe the evaluator works over.
//!
//! This crate provides:
//! - [`Value`] and the [`Heap`] wrapper for shared, copy-on-write storage
//! - Ordering and equality ([`compare`], [`equals`])
//! - Function values: closures and host-provided natives
//! - [`Scope`], the immutable binding chain
//! - [`EvalError`] with its recoverable/fatal split
//! - The immutable update library ([`apply_object`], [`apply_array`],
//!   [`apply_combinations`]) and [`mux`]
//! - The host boundary ([`json`])
//!
//! # Heap Enforcement
//!
//! `Heap::new` is crate-private. Outside code builds heap values through the
//! `Value::` factory methods, so every string, array and object is behind an
//! `Arc` and branches of one evaluation can share them freely.

mod apply;
mod compare;
mod errors;
mod function;
mod heap;
pub mod json;
mod mux;
mod scope;
mod value;

pub use apply::{apply_array, apply_combinations, apply_object, Change};
pub use compare::{compare, equals};
pub use errors::{
    division_by_zero, fatal, index_out_of_range, invalid_assignment_path, invalid_object_key,
    invalid_operand, invalid_unary_operand, normalization_failed, not_callable, not_iterable,
    not_sliceable, size_limit_exceeded, stack_overflow, thrown, type_mismatch,
    undefined_variable, EvalError, EvalErrorKind, EvalResult, Severity,
};
pub use function::{Closure, FunctionValue, Invoker, NativeFn, NativeFunction};
pub use heap::Heap;
pub use mux::mux;
pub use scope::Scope;
pub use value::{Object, Value, MAX_COLLECTION_LEN};
