//! Immutable structural updates.
//!
//! Every function here takes a shared source and returns a result that is
//! the source itself when nothing changed. When something does change, the
//! source is copied at most once per call: the first real change clones the
//! backing storage (it is shared with the caller's handle), every later change
//! mutates that private copy in place.

use crate::heap::Heap;
use crate::value::{Object, Value};

/// A change to one object entry.
#[derive(Clone, Debug, PartialEq)]
pub enum Change {
    Set(Value),
    Delete,
}

/// Apply keyed changes to an object.
///
/// Setting a key to a value equal to its current value, or deleting an
/// absent key, is a no-op.
pub fn apply_object(
    source: &Heap<Object>,
    changes: impl IntoIterator<Item = (String, Change)>,
) -> Heap<Object> {
    let mut result = source.clone();
    for (key, change) in changes {
        match change {
            Change::Delete => {
                if result.contains_key(&key) {
                    result.make_mut().remove(&key);
                }
            }
            Change::Set(value) => {
                if result.get(&key).is_some_and(|current| *current == value) {
                    continue;
                }
                result.make_mut().insert(key, value);
            }
        }
    }
    result
}

/// Apply indexed changes to an array.
///
/// Negative indices count from the end. A non-negative index past the end
/// grows the array, padding with `filler`; a negative index reaching before
/// the start grows it at the front, shifting the existing elements right.
/// Growth is unbounded; callers taking indices from user input check them
/// against [`MAX_COLLECTION_LEN`](crate::MAX_COLLECTION_LEN) first.
pub fn apply_array(
    source: &Heap<Vec<Value>>,
    changes: impl IntoIterator<Item = (i64, Value)>,
    filler: &Value,
) -> Heap<Vec<Value>> {
    let mut result = source.clone();
    for (index, value) in changes {
        let len = result.len() as i64;
        let i = if index < 0 { len + index } else { index };
        if (0..len).contains(&i) && result[i as usize] == value {
            continue;
        }

        let items = result.make_mut();
        if i >= len {
            items.resize(i as usize + 1, filler.clone());
            items[i as usize] = value;
        } else if i < 0 {
            let missing = i.unsigned_abs() as usize;
            items.splice(0..0, std::iter::repeat(filler.clone()).take(missing));
            items[0] = value;
        } else {
            items[i as usize] = value;
        }
    }
    result
}

/// Produce every combination of one candidate per slot.
///
/// Rows are emitted in row-major order with the last slot varying fastest.
/// Each row starts from `source` (truncated or padded with `null` to the
/// number of slots) and is only copied when a chosen candidate differs from
/// the source value at that slot, so rows equal to the source share it.
///
/// No slots yields a single empty row; a slot without candidates yields no
/// rows at all.
pub fn apply_combinations(
    source: &Heap<Vec<Value>>,
    combinations: &[Vec<Value>],
) -> Vec<Heap<Vec<Value>>> {
    let slots = combinations.len();
    let total: usize = combinations.iter().map(Vec::len).product();
    if total == 0 {
        return Vec::new();
    }

    let base = if source.len() == slots {
        source.clone()
    } else {
        let mut items: Vec<Value> = source.iter().take(slots).cloned().collect();
        items.resize(slots, Value::Null);
        Heap::new(items)
    };

    let mut indices = vec![0usize; slots];
    let mut rows = Vec::with_capacity(total);
    loop {
        let mut row = base.clone();
        for (slot, candidates) in combinations.iter().enumerate() {
            let candidate = &candidates[indices[slot]];
            if row[slot] == *candidate {
                continue;
            }
            row.make_mut()[slot] = candidate.clone();
        }
        rows.push(row);
        if rows.len() == total {
            return rows;
        }

        for slot in (0..slots).rev() {
            indices[slot] += 1;
            if indices[slot] < combinations[slot].len() {
                break;
            }
            indices[slot] = 0;
        }
    }
}

#[cfg(test)]
mod tests;
