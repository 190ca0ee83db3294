//! Unary operator implementations for the evaluator.

use jpl_value::{invalid_unary_operand, EvalResult, Value};

/// Arithmetic negation; numbers only.
#[expect(
    clippy::needless_pass_by_value,
    reason = "matches the pipeline calling convention of owned inputs"
)]
pub fn evaluate_negation(value: Value) -> EvalResult {
    match value {
        Value::Number(n) => Ok(Value::Number(-n)),
        _ => Err(invalid_unary_operand("-", &value)),
    }
}

/// Logical negation under the truthiness rule: only `null` and `false` are
/// falsy.
pub fn evaluate_not(value: &Value) -> Value {
    Value::Bool(!value.is_truthy())
}
