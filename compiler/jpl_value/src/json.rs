//! Host value boundary.
//!
//! Host data enters the evaluator through [`normalize`] and leaves it through
//! [`strip`]. `serde_json::Value` is the host representation.

use serde_json::{Map, Number};

use crate::errors::{normalization_failed, EvalResult};
use crate::value::{Object, Value};

/// Convert a host value into a runtime value.
///
/// Every JSON number becomes an `f64`.
pub fn normalize(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::string(s),
        serde_json::Value::Array(items) => Value::array(items.into_iter().map(normalize).collect()),
        serde_json::Value::Object(entries) => Value::object(
            entries
                .into_iter()
                .map(|(key, value)| (key, normalize(value)))
                .collect::<Object>(),
        ),
    }
}

/// Convert a batch of host inputs, which must be an array.
///
/// `name` names the batch in the error message.
pub fn normalize_values(values: serde_json::Value, name: &str) -> EvalResult<Vec<Value>> {
    match values {
        serde_json::Value::Array(items) => Ok(items.into_iter().map(normalize).collect()),
        other => Err(normalization_failed(format!(
            "expected {name} to be an array, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Convert a runtime value back into a host value.
///
/// Functions strip to `null`. Non-finite numbers have no JSON form and are
/// rejected.
pub fn strip(value: &Value) -> EvalResult<serde_json::Value> {
    Ok(match value {
        Value::Null | Value::Function(_) => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => serde_json::Value::Number(strip_number(*n)?),
        Value::String(s) => serde_json::Value::String(s.to_string()),
        Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(strip).collect::<EvalResult<_>>()?)
        }
        Value::Object(entries) => {
            let mut map = Map::new();
            for key in Value::sorted_keys(entries) {
                map.insert(key.clone(), strip(&entries[key])?);
            }
            serde_json::Value::Object(map)
        }
    })
}

/// Strip every value of an output stream.
pub fn strip_values(values: &[Value]) -> EvalResult<Vec<serde_json::Value>> {
    values.iter().map(strip).collect()
}

fn strip_number(n: f64) -> EvalResult<Number> {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return Ok(Number::from(n as i64));
    }
    Number::from_f64(n).ok_or_else(|| normalization_failed(format!("cannot represent {n} as JSON")))
}

const fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
