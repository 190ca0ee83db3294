//! Access chains: field, index, slice, iterate and call selectors.
//!
//! Selector operands (keys, bounds, arguments) always run against the input
//! of the access instruction, not against the value being selected from.

use std::ops::Range;

use jpl_ir::{Pipeline, Selector, SelectorKind};
use jpl_value::{
    index_out_of_range, mux, not_callable, not_iterable, not_sliceable, type_mismatch, EvalResult,
    Scope, Value,
};

use crate::interpreter::{Interpreter, Next};

impl Interpreter {
    pub(crate) fn exec_access(
        &self,
        base: &Pipeline,
        selectors: &[Selector],
        input: Value,
        scope: &Scope,
        next: Next<'_>,
    ) -> EvalResult<Vec<Value>> {
        self.run(base, input.clone(), scope, &|value| {
            self.select(selectors, value, None, &input, scope, next)
        })
    }

    /// Apply `selectors` to `value`. `parent` is the value `value` was
    /// selected from, the receiver of a bound call.
    fn select(
        &self,
        selectors: &[Selector],
        value: Value,
        parent: Option<&Value>,
        input: &Value,
        scope: &Scope,
        next: Next<'_>,
    ) -> EvalResult<Vec<Value>> {
        let Some((selector, rest)) = selectors.split_first() else {
            return next(value);
        };
        let optional = selector.optional;

        match &selector.kind {
            SelectorKind::Field { pipe } => self.run(pipe, input.clone(), scope, &|key| {
                match suppress(field(&value, &key), optional)? {
                    Some(Some(found)) => self.select(rest, found, Some(&value), input, scope, next),
                    Some(None) if !optional => {
                        self.select(rest, Value::Null, Some(&value), input, scope, next)
                    }
                    _ => Ok(Vec::new()),
                }
            }),
            SelectorKind::Iterate => {
                let Some(items) = suppress(iterate(&value), optional)? else {
                    return Ok(Vec::new());
                };
                let mut outputs = Vec::new();
                for item in items {
                    outputs.extend(self.select(rest, item, Some(&value), input, scope, next)?);
                }
                Ok(outputs)
            }
            SelectorKind::Slice { from, to } => self.run(from, input.clone(), scope, &|start| {
                self.run(to, input.clone(), scope, &|end| {
                    match suppress(slice(&value, &start, &end), optional)? {
                        Some(part) => self.select(rest, part, Some(&value), input, scope, next),
                        None => Ok(Vec::new()),
                    }
                })
            }),
            SelectorKind::Call { args, bound } => {
                let Value::Function(function) = &value else {
                    if optional {
                        return Ok(Vec::new());
                    }
                    return Err(not_callable(&value));
                };
                let mut arg_lists = Vec::with_capacity(args.len());
                for arg in args {
                    arg_lists.push(self.evaluate(arg, input.clone(), scope)?);
                }
                let call_input = if *bound {
                    parent.unwrap_or(input).clone()
                } else {
                    input.clone()
                };
                mux(&arg_lists, |row| {
                    let args: Vec<Value> = row.iter().map(|&arg| arg.clone()).collect();
                    let results = self.call_function(function, call_input.clone(), &args)?;
                    let mut outputs = Vec::new();
                    for result in results {
                        outputs.extend(self.select(rest, result, Some(&value), input, scope, next)?);
                    }
                    Ok(outputs)
                })
            }
        }
    }
}

/// Turn a recoverable selector failure into "nothing" for optional selectors.
fn suppress<T>(result: EvalResult<T>, optional: bool) -> EvalResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if optional && err.is_catchable() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Look up `key` in `value`. `Ok(None)` means a missing key on an object or
/// a lookup on `null`.
pub(super) fn field(value: &Value, key: &Value) -> EvalResult<Option<Value>> {
    match (value, key) {
        (Value::Object(object), Value::String(name)) => Ok(object.get(name.as_str()).cloned()),
        (Value::Array(items), Value::Number(index)) => element(items, *index).map(Some),
        (Value::Null, _) => Ok(None),
        _ => Err(type_mismatch(value, key)),
    }
}

/// The element at `index`, counting from the end when negative.
fn element(items: &[Value], index: f64) -> EvalResult {
    let len = items.len();
    let index = index.trunc() as i64;
    let resolved = if index < 0 { index + len as i64 } else { index };
    usize::try_from(resolved)
        .ok()
        .and_then(|i| items.get(i))
        .cloned()
        .ok_or_else(|| index_out_of_range(index, len))
}

/// Array elements in order, object values in key order.
pub(super) fn iterate(value: &Value) -> EvalResult<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items.to_vec()),
        Value::Object(object) => Ok(Value::sorted_keys(object)
            .into_iter()
            .filter_map(|key| object.get(key).cloned())
            .collect()),
        _ => Err(not_iterable(value)),
    }
}

/// `value[start:end]` for arrays and strings; `null` slices to `null`.
fn slice(value: &Value, start: &Value, end: &Value) -> EvalResult {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Array(items) => {
            let range = slice_range(value, items.len(), start, end)?;
            Ok(Value::array(items[range].to_vec()))
        }
        Value::String(s) => {
            let chars: Vec<char> = s.chars().collect();
            let range = slice_range(value, chars.len(), start, end)?;
            Ok(Value::string(chars[range].iter().collect::<String>()))
        }
        _ => Err(not_sliceable(value)),
    }
}

/// Resolve slice bounds against a length. Bounds are numbers (negative from
/// the end) or `null` for the open end, and are clamped into range.
pub(super) fn slice_range(
    target: &Value,
    len: usize,
    start: &Value,
    end: &Value,
) -> EvalResult<Range<usize>> {
    let start = slice_bound(target, len, start, 0)?;
    let end = slice_bound(target, len, end, len)?;
    Ok(start..end.max(start))
}

fn slice_bound(target: &Value, len: usize, bound: &Value, open: usize) -> EvalResult<usize> {
    match bound {
        Value::Null => Ok(open),
        Value::Number(n) => {
            let len = len as i64;
            let index = n.trunc() as i64;
            let resolved = if index < 0 { index + len } else { index };
            Ok(resolved.clamp(0, len) as usize)
        }
        _ => Err(type_mismatch(target, bound)),
    }
}
