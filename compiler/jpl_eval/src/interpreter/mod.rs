//! Pipeline runner and instruction dispatch.
//!
//! # Continuations
//!
//! [`Interpreter::run`] executes a pipeline against one input. The first
//! instruction is dispatched with a continuation that runs the remaining
//! instructions, and the last one hands its outputs to the caller's
//! continuation. Operand pipelines (operator sides, conditions, selector
//! keys) are usually collected with [`Interpreter::evaluate`] and then fanned
//! out, which keeps their outputs in order and their bindings local.
//!
//! # Variable definitions
//!
//! A definition is not an ordinary instruction: its binding covers the rest
//! of the enclosing pipeline, so the runner handles it before dispatch and
//! runs the remainder once per bound value in a child scope.

mod builder;
mod call_frame;
mod function_call;

use jpl_ir::{Instruction, Pipeline};
use jpl_stack::ensure_sufficient_stack;
use jpl_value::{undefined_variable, EvalResult, FunctionValue, Scope, Value};
use tracing::{debug, trace};

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};

use crate::unary_operators::{evaluate_negation, evaluate_not};

/// The rest of the computation downstream of a value.
///
/// Called zero or more times; the results of all calls are concatenated.
pub type Next<'n> = &'n dyn Fn(Value) -> EvalResult<Vec<Value>>;

/// Tree-walking evaluator over instruction pipelines.
///
/// The interpreter itself holds no program state besides the current call
/// depth; everything else flows through scopes and continuations, so one
/// interpreter can run any number of programs in sequence.
pub struct Interpreter {
    max_call_depth: usize,
    call_depth: std::cell::Cell<usize>,
}

impl Interpreter {
    /// Create an interpreter with default limits.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Run `pipe` once per input, passing every output to `next`.
    #[tracing::instrument(level = "debug", skip_all, fields(inputs = inputs.len()))]
    pub fn execute(
        &self,
        pipe: &Pipeline,
        inputs: &[Value],
        scope: &Scope,
        next: Next<'_>,
    ) -> EvalResult<Vec<Value>> {
        let mut outputs = Vec::new();
        for input in inputs {
            outputs.extend(self.run(pipe, input.clone(), scope, next)?);
        }
        debug!(outputs = outputs.len(), "pipeline finished");
        Ok(outputs)
    }

    /// Run `pipe` against `input` and collect its outputs.
    pub fn evaluate(&self, pipe: &[Instruction], input: Value, scope: &Scope) -> EvalResult<Vec<Value>> {
        self.run(pipe, input, scope, &|value| Ok(vec![value]))
    }

    /// Run `pipe` against `input`, handing each output to `next`.
    pub(crate) fn run(
        &self,
        pipe: &[Instruction],
        input: Value,
        scope: &Scope,
        next: Next<'_>,
    ) -> EvalResult<Vec<Value>> {
        ensure_sufficient_stack(|| {
            let Some((instruction, rest)) = pipe.split_first() else {
                return next(input);
            };
            if rest.is_empty() {
                return self.dispatch(instruction, input, scope, next);
            }
            if let Instruction::VariableDefinition { name, pipe } = instruction {
                return self.define(name, pipe, rest, input, scope, next);
            }
            self.dispatch(instruction, input, scope, &|output| {
                self.run(rest, output, scope, next)
            })
        })
    }

    /// Bind each output of `rhs` to `name` and run `rest` with the original
    /// input in the extended scope.
    fn define(
        &self,
        name: &str,
        rhs: &[Instruction],
        rest: &[Instruction],
        input: Value,
        scope: &Scope,
        next: Next<'_>,
    ) -> EvalResult<Vec<Value>> {
        trace!(name, "define");
        self.run(rhs, input.clone(), scope, &|value| {
            let scope = scope.bind(name, value);
            self.run(rest, input.clone(), &scope, next)
        })
    }

    fn dispatch(
        &self,
        instruction: &Instruction,
        input: Value,
        scope: &Scope,
        next: Next<'_>,
    ) -> EvalResult<Vec<Value>> {
        trace!(instruction = instruction.kind_name(), "dispatch");
        match instruction {
            Instruction::ConstantTrue => next(Value::Bool(true)),
            Instruction::ConstantFalse => next(Value::Bool(false)),
            Instruction::ConstantNull => next(Value::Null),
            Instruction::Number { value } => next(Value::Number(*value)),
            Instruction::String { value } => next(Value::string(value.as_str())),
            Instruction::InterpolatedString {
                interpolations,
                after,
            } => self.exec_interpolated_string(interpolations, after, input, scope, next),
            Instruction::Variable { name } => {
                let value = scope
                    .lookup(name)
                    .cloned()
                    .ok_or_else(|| undefined_variable(name))?;
                next(value)
            }
            Instruction::VariableDefinition { name, pipe } => {
                self.define(name, pipe, &[], input, scope, next)
            }
            Instruction::FunctionDefinition { arg_names, pipe } => next(Value::function(
                FunctionValue::closure(arg_names.clone(), pipe.clone(), scope.clone()),
            )),
            Instruction::Access { pipe, operations } => {
                self.exec_access(pipe, operations, input, scope, next)
            }
            Instruction::Assignment {
                pipe,
                operations,
                assignment,
            } => self.exec_assignment(pipe, operations, assignment, input, scope, next),
            Instruction::Calculation { pipe, operations } => {
                self.exec_calculation(pipe, operations, input, scope, next)
            }
            Instruction::Comparison { pipe, comparisons } => {
                self.exec_comparison(pipe, comparisons, input, scope, next)
            }
            Instruction::If { ifs, else_ } => {
                self.exec_if(ifs, else_.as_ref(), input, scope, next)
            }
            Instruction::And { pipes } => self.exec_and(pipes, input, scope, next),
            Instruction::Or { pipes } => self.exec_or(pipes, input, scope, next),
            Instruction::NullCoalescence { pipes } => {
                self.exec_null_coalescence(pipes, input, scope, next)
            }
            Instruction::Negation => next(evaluate_negation(input)?),
            Instruction::Not => next(evaluate_not(&input)),
            Instruction::Try { try_, catch } => self.exec_try(try_, catch, input, scope, next),
            Instruction::ArrayConstructor { pipe } => {
                next(Value::array(self.evaluate(pipe, input, scope)?))
            }
            Instruction::ObjectConstructor { fields } => {
                self.exec_object_constructor(fields, input, scope, next)
            }
            Instruction::OutputConcat { pipes } => {
                let mut outputs = Vec::new();
                for pipe in pipes {
                    outputs.extend(self.run(pipe, input.clone(), scope, next)?);
                }
                Ok(outputs)
            }
            Instruction::Void => Ok(Vec::new()),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Pass every value to `next`, concatenating the results.
pub(crate) fn fan_out(
    values: impl IntoIterator<Item = Value>,
    next: Next<'_>,
) -> EvalResult<Vec<Value>> {
    let mut outputs = Vec::new();
    for value in values {
        outputs.extend(next(value)?);
    }
    Ok(outputs)
}
