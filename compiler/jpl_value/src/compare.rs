//! Total ordering over values.
//!
//! Values of different types order by type:
//! `null < boolean < number < string < array < object < function`.
//! Within a type, booleans order `false < true`, numbers numerically (NaN
//! sorts below every other number and equals only NaN), strings by code point, arrays
//! lexicographically, objects by their sorted key lists and then by the
//! values under those keys. Functions are all equal.

use std::cmp::Ordering;

use crate::heap::Heap;
use crate::value::{Object, Value};

const fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
        Value::Function(_) => 6,
    }
}

/// Compare two values.
pub fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) | (Value::Function(_), Value::Function(_)) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => compare_numbers(*x, *y),
        // UTF-8 byte order is code point order.
        (Value::String(x), Value::String(y)) => x.as_str().cmp(y.as_str()),
        (Value::Array(x), Value::Array(y)) => {
            if Heap::ptr_eq(x, y) {
                return Ordering::Equal;
            }
            compare_arrays(x, y)
        }
        (Value::Object(x), Value::Object(y)) => {
            if Heap::ptr_eq(x, y) {
                return Ordering::Equal;
            }
            compare_objects(x, y)
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Structural equality, i.e. `compare(a, b) == Equal`.
#[inline]
pub fn equals(a: &Value, b: &Value) -> bool {
    compare(a, b) == Ordering::Equal
}

fn compare_numbers(x: f64, y: f64) -> Ordering {
    match (x.is_nan(), y.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}

fn compare_arrays(a: &[Value], b: &[Value]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        let order = compare(x, y);
        if order != Ordering::Equal {
            return order;
        }
    }
    a.len().cmp(&b.len())
}

fn compare_objects(a: &Object, b: &Object) -> Ordering {
    let a_keys = Value::sorted_keys(a);
    let b_keys = Value::sorted_keys(b);
    let order = a_keys.cmp(&b_keys);
    if order != Ordering::Equal {
        return order;
    }
    for key in a_keys {
        let order = compare(&a[key], &b[key]);
        if order != Ordering::Equal {
            return order;
        }
    }
    Ordering::Equal
}
