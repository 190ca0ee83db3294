//! Assignment: rewrite the document along a selector path.
//!
//! The path is walked top down. At the end of the path the assignment
//! operator turns the current target into a list of candidate values. On the
//! way back up, every selector slot contributes its own candidate list; the
//! combinations are materialized with `apply_combinations` and written with
//! `apply_object`/`apply_array`, so untouched parts of the document stay
//! shared with the input.

use jpl_ir::{Assignment, AssignmentOp, Pipeline, Selector, SelectorKind};
use jpl_stack::ensure_sufficient_stack;
use jpl_value::{
    apply_array, apply_combinations, apply_object, index_out_of_range, invalid_assignment_path,
    invalid_operand, not_iterable, not_sliceable, type_mismatch, Change, EvalResult, Heap, Scope,
    Value, MAX_COLLECTION_LEN,
};
use tracing::debug;

use super::access::slice_range;
use crate::interpreter::{fan_out, Interpreter, Next};
use crate::operators::evaluate_arithmetic;

/// What stays fixed while walking one assignment path.
struct AssignContext<'a> {
    assignment: &'a Assignment,
    /// Input of the assignment instruction.
    input: &'a Value,
    scope: &'a Scope,
}

impl Interpreter {
    pub(crate) fn exec_assignment(
        &self,
        base: &Pipeline,
        selectors: &[Selector],
        assignment: &Assignment,
        input: Value,
        scope: &Scope,
        next: Next<'_>,
    ) -> EvalResult<Vec<Value>> {
        debug!(
            op = assignment.op.as_symbol(),
            selectors = selectors.len(),
            "assignment"
        );
        let cx = AssignContext {
            assignment,
            input: &input,
            scope,
        };
        self.run(base, input.clone(), scope, &|document| {
            fan_out(self.assign_at(selectors, document, &cx)?, next)
        })
    }

    /// Every candidate result of writing through `selectors` into `target`.
    fn assign_at(
        &self,
        selectors: &[Selector],
        target: Value,
        cx: &AssignContext<'_>,
    ) -> EvalResult<Vec<Value>> {
        ensure_sufficient_stack(|| {
            let Some((selector, rest)) = selectors.split_first() else {
                return self.assigned_values(target, cx);
            };
            match &selector.kind {
                SelectorKind::Field { pipe } => {
                    let keys = self.evaluate(pipe, cx.input.clone(), cx.scope)?;
                    self.assign_keys(&keys, selector.optional, rest, target, cx)
                }
                SelectorKind::Iterate => self.assign_each(selector.optional, rest, target, cx),
                SelectorKind::Slice { from, to } => {
                    let starts = self.evaluate(from, cx.input.clone(), cx.scope)?;
                    let ends = self.evaluate(to, cx.input.clone(), cx.scope)?;
                    let mut results = Vec::new();
                    for start in &starts {
                        for end in &ends {
                            results.extend(self.assign_slice(
                                start,
                                end,
                                selector.optional,
                                rest,
                                &target,
                                cx,
                            )?);
                        }
                    }
                    Ok(results)
                }
                SelectorKind::Call { .. } => Err(invalid_assignment_path(
                    "a function call cannot be assigned to",
                )),
            }
        })
    }

    /// Candidate values for the end of the path.
    fn assigned_values(&self, target: Value, cx: &AssignContext<'_>) -> EvalResult<Vec<Value>> {
        let rhs = &cx.assignment.pipe;
        if let Some(op) = cx.assignment.op.arithmetic() {
            return self
                .evaluate(rhs, cx.input.clone(), cx.scope)?
                .into_iter()
                .map(|value| evaluate_arithmetic(op, target.clone(), value))
                .collect();
        }
        match cx.assignment.op {
            AssignmentOp::Update => self.evaluate(rhs, target, cx.scope),
            AssignmentOp::NullCoalescence if !target.is_null() => Ok(vec![target]),
            _ => self.evaluate(rhs, cx.input.clone(), cx.scope),
        }
    }

    /// `[key]` with one slot per key. A `null` target becomes an object for
    /// string keys and an array for number keys.
    fn assign_keys(
        &self,
        keys: &[Value],
        optional: bool,
        rest: &[Selector],
        target: Value,
        cx: &AssignContext<'_>,
    ) -> EvalResult<Vec<Value>> {
        let Some(first) = keys.first() else {
            return Ok(vec![target]);
        };
        let target = match (target, first) {
            (Value::Null, Value::String(_)) => Value::empty_object(),
            (Value::Null, Value::Number(_)) => Value::empty_array(),
            (target, _) => target,
        };

        match &target {
            Value::Object(object) if keys.iter().all(|key| key.as_str().is_some()) => {
                let names: Vec<String> = keys
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect();
                let current = names
                    .iter()
                    .map(|name| object.get(name.as_str()).cloned().unwrap_or(Value::Null))
                    .collect();
                let rows = self.assign_slots(current, rest, cx)?;
                Ok(rows
                    .iter()
                    .map(|row| {
                        let changes = names
                            .iter()
                            .cloned()
                            .zip(row.iter().cloned().map(Change::Set));
                        Value::Object(apply_object(object, changes))
                    })
                    .collect())
            }
            Value::Array(items) if keys.iter().all(|key| key.as_number().is_some()) => {
                let indices: Vec<i64> = keys
                    .iter()
                    .filter_map(Value::as_number)
                    .map(|n| n.trunc() as i64)
                    .collect();
                let limit = items.len().max(MAX_COLLECTION_LEN);
                if let Some(&index) = indices.iter().find(|&&i| grown_len(i) > limit) {
                    if optional {
                        return Ok(vec![target.clone()]);
                    }
                    return Err(index_out_of_range(index, items.len()));
                }
                let current = indices
                    .iter()
                    .map(|&index| element_or_null(items, index))
                    .collect();
                let rows = self.assign_slots(current, rest, cx)?;
                Ok(rows
                    .iter()
                    .map(|row| {
                        let changes = indices.iter().copied().zip(row.iter().cloned());
                        Value::Array(apply_array(items, changes, &Value::Null))
                    })
                    .collect())
            }
            _ if optional => Ok(vec![target.clone()]),
            _ => {
                let key = keys
                    .iter()
                    .find(|key| {
                        !matches!(
                            (&target, key),
                            (Value::Object(_), Value::String(_)) | (Value::Array(_), Value::Number(_))
                        )
                    })
                    .unwrap_or(first);
                Err(type_mismatch(&target, key))
            }
        }
    }

    /// `[]` with one slot per element (arrays) or value (objects).
    fn assign_each(
        &self,
        optional: bool,
        rest: &[Selector],
        target: Value,
        cx: &AssignContext<'_>,
    ) -> EvalResult<Vec<Value>> {
        match &target {
            Value::Array(items) => {
                let mut candidates = Vec::with_capacity(items.len());
                for item in items.iter() {
                    candidates.push(self.assign_at(rest, item.clone(), cx)?);
                }
                Ok(apply_combinations(items, &candidates)
                    .into_iter()
                    .map(Value::Array)
                    .collect())
            }
            Value::Object(object) => {
                let keys: Vec<String> = Value::sorted_keys(object).into_iter().cloned().collect();
                let current = keys
                    .iter()
                    .map(|key| object.get(key).cloned().unwrap_or(Value::Null))
                    .collect();
                let rows = self.assign_slots(current, rest, cx)?;
                Ok(rows
                    .iter()
                    .map(|row| {
                        let changes = keys.iter().cloned().zip(row.iter().cloned().map(Change::Set));
                        Value::Object(apply_object(object, changes))
                    })
                    .collect())
            }
            Value::Null => Ok(vec![Value::Null]),
            _ if optional => Ok(vec![target.clone()]),
            _ => Err(not_iterable(&target)),
        }
    }

    /// Recurse into every slot and combine the per-slot candidates.
    fn assign_slots(
        &self,
        current: Vec<Value>,
        rest: &[Selector],
        cx: &AssignContext<'_>,
    ) -> EvalResult<Vec<Heap<Vec<Value>>>> {
        let mut candidates = Vec::with_capacity(current.len());
        for value in &current {
            candidates.push(self.assign_at(rest, value.clone(), cx)?);
        }
        Ok(apply_combinations(&Value::shared_items(current), &candidates))
    }

    /// `[start:end]`: the candidates replace the sliced range and must have
    /// the target's type. A `null` target slices like an empty array.
    fn assign_slice(
        &self,
        start: &Value,
        end: &Value,
        optional: bool,
        rest: &[Selector],
        target: &Value,
        cx: &AssignContext<'_>,
    ) -> EvalResult<Vec<Value>> {
        let op = cx.assignment.op.as_symbol();
        let items: &[Value] = match target {
            Value::Null => &[],
            Value::Array(items) => items.as_slice(),
            Value::String(text) => {
                let chars: Vec<char> = text.chars().collect();
                let range = slice_range(target, chars.len(), start, end)?;
                let current = Value::string(chars[range.clone()].iter().collect::<String>());
                return self
                    .assign_at(rest, current, cx)?
                    .iter()
                    .map(|candidate| match candidate {
                        Value::String(replacement) => {
                            let mut spliced: String = chars[..range.start].iter().collect();
                            spliced.push_str(replacement);
                            spliced.extend(&chars[range.end..]);
                            Ok(Value::string(spliced))
                        }
                        _ => Err(invalid_operand(op, target, candidate)),
                    })
                    .collect();
            }
            _ if optional => return Ok(vec![target.clone()]),
            _ => return Err(not_sliceable(target)),
        };

        let range = slice_range(target, items.len(), start, end)?;
        let current = Value::array(items[range.clone()].to_vec());
        self.assign_at(rest, current, cx)?
            .iter()
            .map(|candidate| match candidate {
                Value::Array(replacement) => {
                    let mut spliced = items[..range.start].to_vec();
                    spliced.extend(replacement.iter().cloned());
                    spliced.extend_from_slice(&items[range.end..]);
                    Ok(Value::array(spliced))
                }
                _ => Err(invalid_operand(op, target, candidate)),
            })
            .collect()
    }
}

/// The element at `index` (negative from the end), or `null` outside the
/// array.
/// Length an array must have for `index` to name one of its slots.
fn grown_len(index: i64) -> usize {
    let needed = if index < 0 {
        index.unsigned_abs()
    } else {
        index.unsigned_abs().saturating_add(1)
    };
    usize::try_from(needed).unwrap_or(usize::MAX)
}

fn element_or_null(items: &[Value], index: i64) -> Value {
    let resolved = if index < 0 {
        index + items.len() as i64
    } else {
        index
    };
    usize::try_from(resolved)
        .ok()
        .and_then(|i| items.get(i))
        .cloned()
        .unwrap_or(Value::Null)
}
