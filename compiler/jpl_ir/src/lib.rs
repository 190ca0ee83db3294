//! JPL IR - instruction tree types.
//!
//! A program is a [`Pipeline`]: an ordered sequence of [`Instruction`]s.
//! Every nested operand (call arguments, branch bodies, computed keys) is
//! itself a pipeline, so the whole program forms a tree of pipelines.
//!
//! # Design
//!
//! - **Closed set**: `Instruction` is a single enum. The parser builds it and
//!   the evaluator and printer match on it exhaustively.
//! - **Shared, immutable**: pipelines are `Arc<[Instruction]>` so closures can
//!   keep their body alive without copying it.

mod instruction;
mod operators;

pub use instruction::{
    Assignment, CalculationStep, ComparisonStep, IfThen, Instruction, Interpolation, ObjectField,
    Pipeline, Selector, SelectorKind,
};
pub use operators::{ArithmeticOp, AssignmentOp, ComparisonOp};
