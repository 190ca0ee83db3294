//! Operator chains, conditionals, boolean connectives and error interception.

use std::cell::RefCell;

use jpl_ir::{CalculationStep, ComparisonStep, IfThen, Pipeline};
use jpl_value::{EvalError, EvalResult, Scope, Value};
use tracing::{debug, trace};

use crate::interpreter::{fan_out, Interpreter, Next};
use crate::operators::{evaluate_arithmetic, evaluate_comparison};

impl Interpreter {
    /// `pipe op1 by1 op2 by2 ...`, folded left to right. Every `by` runs
    /// against the original input, not the running value.
    pub(crate) fn exec_calculation(
        &self,
        pipe: &Pipeline,
        steps: &[CalculationStep],
        input: Value,
        scope: &Scope,
        next: Next<'_>,
    ) -> EvalResult<Vec<Value>> {
        self.run(pipe, input.clone(), scope, &|left| {
            self.calculate_from(steps, left, &input, scope, next)
        })
    }

    fn calculate_from(
        &self,
        steps: &[CalculationStep],
        left: Value,
        input: &Value,
        scope: &Scope,
        next: Next<'_>,
    ) -> EvalResult<Vec<Value>> {
        let Some((step, rest)) = steps.split_first() else {
            return next(left);
        };
        self.run(&step.by, input.clone(), scope, &|right| {
            let value = evaluate_arithmetic(step.op, left.clone(), right)?;
            self.calculate_from(rest, value, input, scope, next)
        })
    }

    /// Comparison chains fold like calculations; after the first step the
    /// running value is a boolean.
    pub(crate) fn exec_comparison(
        &self,
        pipe: &Pipeline,
        steps: &[ComparisonStep],
        input: Value,
        scope: &Scope,
        next: Next<'_>,
    ) -> EvalResult<Vec<Value>> {
        self.run(pipe, input.clone(), scope, &|left| {
            self.compare_from(steps, left, &input, scope, next)
        })
    }

    fn compare_from(
        &self,
        steps: &[ComparisonStep],
        left: Value,
        input: &Value,
        scope: &Scope,
        next: Next<'_>,
    ) -> EvalResult<Vec<Value>> {
        let Some((step, rest)) = steps.split_first() else {
            return next(left);
        };
        self.run(&step.by, input.clone(), scope, &|right| {
            let value = Value::Bool(evaluate_comparison(step.op, &left, &right));
            self.compare_from(rest, value, input, scope, next)
        })
    }

    /// Every condition output picks a branch on its own. With no matching
    /// branch and no `else`, the input passes through.
    pub(crate) fn exec_if(
        &self,
        ifs: &[IfThen],
        else_: Option<&Pipeline>,
        input: Value,
        scope: &Scope,
        next: Next<'_>,
    ) -> EvalResult<Vec<Value>> {
        self.if_from(ifs, else_, &input, scope, next)
    }

    fn if_from(
        &self,
        ifs: &[IfThen],
        else_: Option<&Pipeline>,
        input: &Value,
        scope: &Scope,
        next: Next<'_>,
    ) -> EvalResult<Vec<Value>> {
        let Some((branch, rest)) = ifs.split_first() else {
            return match else_ {
                Some(pipe) => self.run(pipe, input.clone(), scope, next),
                None => next(input.clone()),
            };
        };
        self.run(&branch.if_, input.clone(), scope, &|condition| {
            if condition.is_truthy() {
                self.run(&branch.then, input.clone(), scope, next)
            } else {
                self.if_from(rest, else_, input, scope, next)
            }
        })
    }

    /// `a and b and ...`: a falsy operand output yields `false` without
    /// evaluating the operands after it.
    pub(crate) fn exec_and(
        &self,
        pipes: &[Pipeline],
        input: Value,
        scope: &Scope,
        next: Next<'_>,
    ) -> EvalResult<Vec<Value>> {
        self.connective_from(pipes, false, &input, scope, next)
    }

    /// `a or b or ...`: a truthy operand output yields `true` without
    /// evaluating the operands after it.
    pub(crate) fn exec_or(
        &self,
        pipes: &[Pipeline],
        input: Value,
        scope: &Scope,
        next: Next<'_>,
    ) -> EvalResult<Vec<Value>> {
        self.connective_from(pipes, true, &input, scope, next)
    }

    /// Shared fold for `and` (`decisive = false`) and `or` (`decisive = true`).
    fn connective_from(
        &self,
        pipes: &[Pipeline],
        decisive: bool,
        input: &Value,
        scope: &Scope,
        next: Next<'_>,
    ) -> EvalResult<Vec<Value>> {
        let Some((pipe, rest)) = pipes.split_first() else {
            return next(Value::Bool(!decisive));
        };
        self.run(pipe, input.clone(), scope, &|value| {
            if value.is_truthy() == decisive {
                next(Value::Bool(decisive))
            } else {
                self.connective_from(rest, decisive, input, scope, next)
            }
        })
    }

    /// `a ?? b ?? ...`: the non-null outputs of the first alternative that
    /// has any. Alternatives failing with a catchable error are skipped. The
    /// last alternative is taken as is.
    pub(crate) fn exec_null_coalescence(
        &self,
        pipes: &[Pipeline],
        input: Value,
        scope: &Scope,
        next: Next<'_>,
    ) -> EvalResult<Vec<Value>> {
        let Some((last, alternatives)) = pipes.split_last() else {
            return next(Value::Null);
        };
        for pipe in alternatives {
            let values = match self.evaluate(pipe, input.clone(), scope) {
                Ok(values) => values,
                Err(err) if err.is_catchable() => {
                    trace!(error = %err, "null coalescence skips failing alternative");
                    continue;
                }
                Err(err) => return Err(err),
            };
            let present: Vec<Value> = values.into_iter().filter(|v| !v.is_null()).collect();
            if !present.is_empty() {
                return fan_out(present, next);
            }
        }
        self.run(last, input, scope, next)
    }

    /// `try a catch b`.
    ///
    /// Outputs of `a` that reached `next` before a failure are kept. Errors
    /// coming back out of `next` are enclosed on the way through `a`, so only
    /// errors raised by `a` itself are caught.
    pub(crate) fn exec_try(
        &self,
        try_: &Pipeline,
        catch: &Pipeline,
        input: Value,
        scope: &Scope,
        next: Next<'_>,
    ) -> EvalResult<Vec<Value>> {
        let emitted = RefCell::new(Vec::new());
        let result = self.run(try_, input, scope, &|value| {
            let outputs = next(value).map_err(EvalError::enclose)?;
            emitted.borrow_mut().extend(outputs);
            Ok(Vec::new())
        });
        let mut outputs = emitted.into_inner();
        match result {
            Ok(_) => Ok(outputs),
            Err(err) if err.is_catchable() => {
                debug!(error = %err, "caught");
                outputs.extend(self.run(catch, err.payload(), scope, next)?);
                Ok(outputs)
            }
            Err(err) => Err(err.disclose()),
        }
    }
}
