#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn num(n: i32) -> Value {
    Value::Number(f64::from(n))
}

fn heap_array(items: Vec<Value>) -> Heap<Vec<Value>> {
    Heap::new(items)
}

fn heap_object(entries: &[(&str, i32)]) -> Heap<Object> {
    Heap::new(
        entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), num(*v)))
            .collect(),
    )
}

#[test]
fn object_set_copies_once() {
    let source = heap_object(&[("a", 1), ("b", 2)]);
    let result = apply_object(
        &source,
        vec![
            ("a".to_owned(), Change::Set(num(10))),
            ("c".to_owned(), Change::Set(num(3))),
        ],
    );
    assert!(!Heap::ptr_eq(&source, &result));
    assert_eq!(source.len(), 2);
    assert_eq!(result.len(), 3);
    assert_eq!(result["a"], num(10));
    assert_eq!(result["c"], num(3));
}

#[test]
fn object_no_op_changes_share_source() {
    let source = heap_object(&[("a", 1)]);
    let result = apply_object(
        &source,
        vec![
            ("a".to_owned(), Change::Set(num(1))),
            ("missing".to_owned(), Change::Delete),
        ],
    );
    assert!(Heap::ptr_eq(&source, &result));
}

#[test]
fn object_delete() {
    let source = heap_object(&[("a", 1), ("b", 2)]);
    let result = apply_object(&source, vec![("a".to_owned(), Change::Delete)]);
    assert!(!result.contains_key("a"));
    assert!(source.contains_key("a"));
}

#[test]
fn array_set_last_with_negative_index() {
    let source = heap_array(vec![num(1), num(2), num(3)]);
    let result = apply_array(&source, vec![(-1, num(9))], &Value::Null);
    assert_eq!(*result, vec![num(1), num(2), num(9)]);
    assert_eq!(*source, vec![num(1), num(2), num(3)]);
}

#[test]
fn array_grows_at_the_end_with_filler() {
    let source = heap_array(vec![num(1)]);
    let result = apply_array(&source, vec![(3, num(4))], &Value::Null);
    assert_eq!(*result, vec![num(1), Value::Null, Value::Null, num(4)]);
}

#[test]
fn array_grows_at_the_front_for_negative_indices() {
    let source = heap_array(vec![num(1), num(2)]);
    let result = apply_array(&source, vec![(-4, num(0))], &Value::Bool(false));
    assert_eq!(
        *result,
        vec![num(0), Value::Bool(false), num(1), num(2)]
    );
}

#[test]
fn array_no_op_shares_source() {
    let source = heap_array(vec![num(1), num(2)]);
    let result = apply_array(&source, vec![(0, num(1)), (-1, num(2))], &Value::Null);
    assert!(Heap::ptr_eq(&source, &result));
}

#[test]
fn combinations_of_nothing_is_one_empty_row() {
    let source = heap_array(Vec::new());
    let rows = apply_combinations(&source, &[]);
    assert_eq!(rows.len(), 1);
    assert!(rows[0].is_empty());
}

#[test]
fn combinations_last_slot_varies_fastest() {
    let source = heap_array(Vec::new());
    let rows = apply_combinations(&source, &[vec![num(1), num(2)], vec![num(3), num(4)]]);
    let rows: Vec<Vec<Value>> = rows.into_iter().map(Heap::unwrap_or_clone).collect();
    assert_eq!(
        rows,
        vec![
            vec![num(1), num(3)],
            vec![num(1), num(4)],
            vec![num(2), num(3)],
            vec![num(2), num(4)],
        ]
    );
}

#[test]
fn combinations_reuse_matching_source() {
    let source = heap_array(vec![num(1), num(2)]);
    let rows = apply_combinations(&source, &[vec![num(1)], vec![num(2), num(5)]]);
    assert_eq!(rows.len(), 2);
    assert!(Heap::ptr_eq(&rows[0], &source));
    assert!(!Heap::ptr_eq(&rows[1], &source));
    assert_eq!(*rows[1], vec![num(1), num(5)]);
}

#[test]
fn combinations_with_an_empty_slot_are_empty() {
    let source = heap_array(Vec::new());
    assert!(apply_combinations(&source, &[vec![num(1)], Vec::new()]).is_empty());
}

#[test]
fn combinations_pad_short_sources() {
    let source = heap_array(vec![num(7)]);
    let rows = apply_combinations(&source, &[vec![num(7)], vec![Value::Null]]);
    assert_eq!(*rows[0], vec![num(7), Value::Null]);
}

proptest! {
    #[test]
    fn object_rewriting_existing_values_never_copies(
        entries in prop::collection::hash_map("[a-e]", -5i32..5, 0..6),
    ) {
        let source: Heap<Object> = Heap::new(
            entries.iter().map(|(k, v)| (k.clone(), num(*v))).collect(),
        );
        let changes: Vec<(String, Change)> = entries
            .iter()
            .map(|(k, v)| (k.clone(), Change::Set(num(*v))))
            .collect();
        let result = apply_object(&source, changes);
        prop_assert!(Heap::ptr_eq(&source, &result));
    }

    #[test]
    fn negative_one_sets_last_without_growing(
        items in prop::collection::vec(-5i32..5, 1..8),
        v in -5i32..5,
    ) {
        let source = heap_array(items.iter().copied().map(num).collect());
        let result = apply_array(&source, vec![(-1, num(v))], &Value::Null);
        prop_assert_eq!(result.len(), items.len());
        prop_assert_eq!(result.last().cloned(), Some(num(v)));
    }

    #[test]
    fn writing_past_the_end_pads_with_filler(
        items in prop::collection::vec(-5i32..5, 0..6),
        extra in 0usize..6,
    ) {
        let n = items.len();
        let i = n + extra;
        let source = heap_array(items.iter().copied().map(num).collect());
        let filler = Value::string("fill");
        let result = apply_array(&source, vec![(i as i64, num(42))], &filler);
        prop_assert_eq!(result.len(), i + 1);
        for slot in n..i {
            prop_assert_eq!(&result[slot], &filler);
        }
        prop_assert_eq!(&result[i], &num(42));
    }

    #[test]
    fn combination_count_is_the_product(
        sizes in prop::collection::vec(0usize..4, 0..4),
    ) {
        let combinations: Vec<Vec<Value>> = sizes
            .iter()
            .map(|&size| (0..size as i32).map(num).collect())
            .collect();
        let rows = apply_combinations(&heap_array(Vec::new()), &combinations);
        prop_assert_eq!(rows.len(), sizes.iter().product::<usize>());
    }
}
