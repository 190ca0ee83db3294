//! Parsed programs bound to their options.

use jpl_ir::Pipeline;
use jpl_value::json::{normalize, normalize_values, strip_values};
use jpl_value::Value;
use tracing::debug;

use crate::{JplError, Options};

/// A parsed program, ready to run against any number of inputs.
#[derive(Clone, Debug)]
pub struct Program {
    source: String,
    pipeline: Pipeline,
    options: Options,
}

impl Program {
    /// Parse `source` with default options.
    pub fn new(source: impl Into<String>) -> Result<Self, JplError> {
        Self::with_options(source, Options::default())
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn with_options(source: impl Into<String>, options: Options) -> Result<Self, JplError> {
        let source = source.into();
        let pipeline = jpl_parse::parse(&source)?;
        debug!(
            instructions = pipeline.len(),
            presets = options.vars.len(),
            "program ready"
        );
        Ok(Program {
            source,
            pipeline,
            options,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The program in canonical form. Parsing it again gives a program
    /// that behaves the same on every input.
    pub fn to_source(&self) -> String {
        jpl_fmt::format_pipeline(&self.pipeline)
    }

    /// Run against one input.
    pub fn run(&self, input: Value) -> Result<Vec<Value>, JplError> {
        let interpreter = self.options.interpreter();
        Ok(interpreter.evaluate(&self.pipeline, input, &self.options.scope())?)
    }

    /// Run once per input and concatenate the outputs.
    pub fn run_each(&self, inputs: &[Value]) -> Result<Vec<Value>, JplError> {
        let outputs = self.options.interpreter().execute(
            &self.pipeline,
            inputs,
            &self.options.scope(),
            &|value| Ok(vec![value]),
        )?;
        Ok(outputs)
    }

    /// Run against one host value and strip the outputs back to JSON.
    pub fn run_json(&self, input: serde_json::Value) -> Result<Vec<serde_json::Value>, JplError> {
        let outputs = self.run(normalize(input))?;
        Ok(strip_values(&outputs)?)
    }

    /// Run against a batch of host values, which must be a JSON array.
    pub fn run_batch(&self, inputs: serde_json::Value) -> Result<Vec<serde_json::Value>, JplError> {
        let inputs = normalize_values(inputs, "inputs")?;
        let outputs = self.run_each(&inputs)?;
        Ok(strip_values(&outputs)?)
    }
}
