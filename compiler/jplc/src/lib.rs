//! JPL: a pipeline language for querying and rewriting JSON documents.
//!
//! This crate ties the workspace together:
//!
//! ```text
//! source ──► jpl_parse::parse ──► Pipeline
//!                                    │
//!          host JSON ──► normalize ──┤
//!                                    ▼
//!                         jpl_eval::Interpreter ──► Vec<Value> ──► strip ──► host JSON
//! ```
//!
//! [`parse`] and [`evaluate`] are the two primitive entry points. [`Program`]
//! keeps a parsed pipeline together with its [`Options`] for repeated runs,
//! and [`parse_function`] turns source text into a function value a host can
//! hand to other programs.

mod error;
mod function;
mod options;
mod program;

use std::sync::Once;

use jpl_eval::Interpreter;
use rustc_hash::FxHashMap;

pub use error::JplError;
pub use function::{call_function, parse_function};
pub use jpl_ir::Pipeline;
pub use jpl_parse::{ErrorContext, ParseError};
pub use jpl_value::json::{normalize, normalize_values, strip, strip_values};
pub use jpl_value::{thrown, EvalError, EvalErrorKind, FunctionValue, Invoker, Scope, Value};
pub use options::Options;
pub use program::Program;

/// Parse program source into a pipeline.
pub fn parse(source: &str) -> Result<Pipeline, JplError> {
    Ok(jpl_parse::parse(source)?)
}

/// Run `pipeline` against `input` with `presets` as the only variables in
/// scope, collecting every output in order.
pub fn evaluate(
    pipeline: &Pipeline,
    input: Value,
    presets: &FxHashMap<String, Value>,
) -> Result<Vec<Value>, JplError> {
    let scope = Scope::with_presets(presets.clone());
    Ok(Interpreter::new().evaluate(pipeline, input, &scope)?)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=jpl_eval=debug` or
/// `RUST_LOG=jpl_parse=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
