//! Canonical printer for JPL.
//!
//! Renders an instruction tree back to source text that parses to an equal
//! tree. The output is canonical rather than pretty: every operand is
//! parenthesized and field names are printed as bracketed string keys, so
//! `.a + 1` comes back as `(.[("a")]) + (1)`.
//!
//! # Modules
//!
//! - [`emitter`]: output sink abstraction
//! - [`printer`]: the tree walk

pub mod emitter;
pub mod printer;

pub use emitter::{Emitter, StringEmitter};
pub use printer::Printer;

use jpl_ir::Pipeline;

/// Print `pipeline` as JPL source.
pub fn format_pipeline(pipeline: &Pipeline) -> String {
    let mut emitter = StringEmitter::with_capacity(pipeline.len() * 16);
    Printer::new(&mut emitter).print_pipeline(pipeline);
    emitter.output()
}
