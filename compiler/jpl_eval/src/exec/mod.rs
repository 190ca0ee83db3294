//! Per-instruction semantics.
//!
//! Each submodule adds `exec_*` methods to [`Interpreter`](crate::Interpreter)
//! for one family of instructions.

mod access;
mod assignment;
mod constructors;
mod control;
