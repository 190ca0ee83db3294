//! Object constructors and interpolated strings.
//!
//! Both evaluate their parts against the input first and then emit one
//! value per combination of part outputs.

use jpl_ir::{Interpolation, ObjectField};
use jpl_value::{invalid_object_key, mux, EvalError, EvalResult, Object, Scope, Value};

use crate::interpreter::{fan_out, Interpreter, Next};

impl Interpreter {
    /// `{key: value, ...}`. Optional fields are left out when their value is
    /// `null`; a repeated key keeps its last value.
    pub(crate) fn exec_object_constructor(
        &self,
        fields: &[ObjectField],
        input: Value,
        scope: &Scope,
        next: Next<'_>,
    ) -> EvalResult<Vec<Value>> {
        let mut candidates: Vec<Vec<(String, Value)>> = Vec::with_capacity(fields.len());
        for field in fields {
            let keys = self.evaluate(&field.key, input.clone(), scope)?;
            let values = self.evaluate(&field.value, input.clone(), scope)?;
            let mut entries = Vec::with_capacity(keys.len() * values.len());
            for key in &keys {
                let Value::String(name) = key else {
                    return Err(invalid_object_key(key));
                };
                for value in &values {
                    entries.push((name.to_string(), value.clone()));
                }
            }
            candidates.push(entries);
        }

        let objects = mux(&candidates, |row| {
            let mut object = Object::default();
            for (entry, field) in row.iter().zip(fields) {
                let (key, value) = *entry;
                if field.optional && value.is_null() {
                    continue;
                }
                object.insert(key.clone(), value.clone());
            }
            Ok::<_, EvalError>(vec![Value::object(object)])
        })?;
        fan_out(objects, next)
    }

    /// `"before\(pipe)...after"`. Strings are inserted as they are, other
    /// values as compact JSON.
    pub(crate) fn exec_interpolated_string(
        &self,
        interpolations: &[Interpolation],
        after: &str,
        input: Value,
        scope: &Scope,
        next: Next<'_>,
    ) -> EvalResult<Vec<Value>> {
        let mut parts: Vec<Vec<String>> = Vec::with_capacity(interpolations.len());
        for interpolation in interpolations {
            let values = self.evaluate(&interpolation.pipe, input.clone(), scope)?;
            parts.push(values.iter().map(|value| value.stringify(true)).collect());
        }

        let strings = mux(&parts, |row| {
            let mut text = String::new();
            for (interpolation, part) in interpolations.iter().zip(row) {
                text.push_str(&interpolation.before);
                text.push_str(part);
            }
            text.push_str(after);
            Ok::<_, EvalError>(vec![Value::string(text)])
        })?;
        fan_out(strings, next)
    }
}
