//! Binary operator implementations for the evaluator.
//!
//! Direct enum-based dispatch over the operand pair. A pair with no rule is
//! a recoverable `invalid_operand` error.

use jpl_ir::{ArithmeticOp, ComparisonOp};
use jpl_value::{
    apply_object, compare, division_by_zero, equals, invalid_operand, size_limit_exceeded,
    Change, EvalResult, Heap, Object, Value, MAX_COLLECTION_LEN,
};

/// Evaluate an arithmetic operator.
#[expect(
    clippy::needless_pass_by_value,
    reason = "operands are consumed so unshared strings and arrays can be extended in place"
)]
pub fn evaluate_arithmetic(op: ArithmeticOp, left: Value, right: Value) -> EvalResult {
    match op {
        ArithmeticOp::Addition => add(left, right),
        ArithmeticOp::Subtraction => subtract(&left, &right),
        ArithmeticOp::Multiplication => multiply(&left, &right),
        ArithmeticOp::Division => divide(&left, &right),
        ArithmeticOp::Remainder => remainder(&left, &right),
    }
}

/// Evaluate a comparison operator under the total value order.
pub fn evaluate_comparison(op: ComparisonOp, left: &Value, right: &Value) -> bool {
    match op {
        ComparisonOp::Equal => equals(left, right),
        ComparisonOp::Unequal => !equals(left, right),
        ComparisonOp::Less => compare(left, right).is_lt(),
        ComparisonOp::LessEqual => compare(left, right).is_le(),
        ComparisonOp::Greater => compare(left, right).is_gt(),
        ComparisonOp::GreaterEqual => compare(left, right).is_ge(),
    }
}

fn add(left: Value, right: Value) -> EvalResult {
    match (left, right) {
        (Value::Null, other) | (other, Value::Null) => Ok(other),
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::String(a), Value::String(b)) => {
            if b.is_empty() {
                return Ok(Value::String(a));
            }
            let mut joined = a.unwrap_or_clone();
            joined.push_str(&b);
            Ok(Value::string(joined))
        }
        (Value::Array(a), Value::Array(b)) => {
            if b.is_empty() {
                return Ok(Value::Array(a));
            }
            let mut items = a.unwrap_or_clone();
            items.extend(b.iter().cloned());
            Ok(Value::array(items))
        }
        (Value::Object(a), Value::Object(b)) => Ok(Value::Object(apply_object(
            &a,
            b.iter()
                .map(|(key, value)| (key.clone(), Change::Set(value.clone()))),
        ))),
        (left, right) => Err(invalid_operand("+", &left, &right)),
    }
}

fn subtract(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),
        (Value::Array(a), Value::Array(b)) => {
            if !a.iter().any(|item| b.iter().any(|removed| equals(item, removed))) {
                return Ok(left.clone());
            }
            Ok(Value::array(
                a.iter()
                    .filter(|item| !b.iter().any(|removed| equals(item, removed)))
                    .cloned()
                    .collect(),
            ))
        }
        _ => Err(invalid_operand("-", left, right)),
    }
}

fn multiply(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a * b)),
        (Value::String(s), Value::Number(n)) | (Value::Number(n), Value::String(s)) => {
            let count = n.trunc();
            if count < 1.0 {
                return Ok(Value::Null);
            }
            repeat(s, count)
        }
        (Value::Object(a), Value::Object(b)) => Ok(Value::Object(deep_merge(a, b))),
        _ => Err(invalid_operand("*", left, right)),
    }
}

/// `text` repeated `count` times, for a `count` of at least one.
fn repeat(text: &str, count: f64) -> EvalResult {
    if text.is_empty() {
        return Ok(Value::string(""));
    }
    let total = if count <= MAX_COLLECTION_LEN as f64 {
        text.len().checked_mul(count as usize)
    } else {
        None
    };
    match total {
        Some(len) if len <= MAX_COLLECTION_LEN => Ok(Value::string(text.repeat(count as usize))),
        _ => Err(size_limit_exceeded(MAX_COLLECTION_LEN)),
    }
}

/// Merge `right` into `left`, recursing where both sides hold an object.
fn deep_merge(left: &Heap<Object>, right: &Object) -> Heap<Object> {
    apply_object(
        left,
        right.iter().map(|(key, value)| {
            let merged = match (left.get(key), value) {
                (Some(Value::Object(inner)), Value::Object(other)) => {
                    Value::Object(deep_merge(inner, other))
                }
                _ => value.clone(),
            };
            (key.clone(), Change::Set(merged))
        }),
    )
}

fn divide(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Number(_), Value::Number(b)) if *b == 0.0 => Err(division_by_zero()),
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a / b)),
        (Value::String(s), Value::String(separator)) => {
            let parts: Vec<Value> = if s.is_empty() {
                Vec::new()
            } else if separator.is_empty() {
                s.chars().map(|c| Value::string(c.to_string())).collect()
            } else {
                s.split(separator.as_str()).map(Value::string).collect()
            };
            Ok(Value::array(parts))
        }
        _ => Err(invalid_operand("/", left, right)),
    }
}

fn remainder(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Number(_), Value::Number(b)) if *b == 0.0 => Err(division_by_zero()),
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a % b)),
        _ => Err(invalid_operand("%", left, right)),
    }
}
