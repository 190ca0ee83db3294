//! Tests for access chains.

use jpl_value::EvalErrorKind;
use serde_json::json;

use super::{eval, eval_err};

fn nothing() -> Vec<serde_json::Value> {
    Vec::new()
}

mod fields {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn chains_descend() {
        assert_eq!(eval(".a.b", json!({"a": {"b": 1}})), vec![json!(1)]);
        assert_eq!(eval(r#"."a b""#, json!({"a b": 2})), vec![json!(2)]);
        assert_eq!(eval(r#".["end"]"#, json!({"end": 3})), vec![json!(3)]);
    }

    #[test]
    fn missing_keys_are_null() {
        assert_eq!(eval(".a.b", json!({})), vec![json!(null)]);
        assert_eq!(eval(".a", json!(null)), vec![json!(null)]);
    }

    #[test]
    fn optional_missing_keys_produce_nothing() {
        assert_eq!(eval(".a?", json!({})), nothing());
        assert_eq!(eval(".a?", json!(null)), nothing());
        assert_eq!(eval(".a?.b", json!({"a": {"b": 1}})), vec![json!(1)]);
    }

    #[test]
    fn wrong_container_type_fails() {
        let err = eval_err(".a", json!(1));
        assert_eq!(
            err.kind,
            EvalErrorKind::TypeMismatch {
                type_name: "number",
                key_type: "string",
            }
        );
        assert_eq!(eval(".a?", json!(1)), nothing());
    }

    #[test]
    fn every_key_output_selects() {
        assert_eq!(
            eval(r#".["a", "b"]"#, json!({"a": 1, "b": 2})),
            vec![json!(1), json!(2)]
        );
    }

    #[test]
    fn keys_are_evaluated_against_the_access_input() {
        assert_eq!(
            eval(".data[.key]", json!({"key": "x", "data": {"x": 5}})),
            vec![json!(5)]
        );
    }
}

mod indices {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn negative_indices_count_from_the_end() {
        assert_eq!(eval(".[1]", json!([1, 2, 3])), vec![json!(2)]);
        assert_eq!(eval(".[-1]", json!([1, 2, 3])), vec![json!(3)]);
        assert_eq!(eval(".[1.7]", json!([1, 2, 3])), vec![json!(2)]);
    }

    #[test]
    fn out_of_range_fails_unless_optional() {
        let err = eval_err(".[5]", json!([1, 2, 3]));
        assert_eq!(err.kind, EvalErrorKind::IndexOutOfRange { index: 5, len: 3 });
        assert_eq!(eval(".[5]?", json!([1, 2, 3])), nothing());
        assert_eq!(eval(".[-4]?", json!([1, 2, 3])), nothing());
    }
}

mod iteration {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn arrays_in_order_and_objects_by_key() {
        assert_eq!(eval(".[]", json!([1, 2])), vec![json!(1), json!(2)]);
        assert_eq!(eval(".[]", json!({"b": 2, "a": 1})), vec![json!(1), json!(2)]);
        assert_eq!(eval(".[][]", json!([[1], [], [2, 3]])), vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn scalars_cannot_be_iterated() {
        assert_eq!(
            eval_err(".[]", json!(1)).kind,
            EvalErrorKind::NotIterable {
                type_name: "number"
            }
        );
        assert_eq!(eval(".[]?", json!(1)), nothing());
    }
}

mod slices {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn arrays_slice_with_clamped_bounds() {
        let input = json!([1, 2, 3]);
        assert_eq!(eval(".[1:]", input.clone()), vec![json!([2, 3])]);
        assert_eq!(eval(".[:-1]", input.clone()), vec![json!([1, 2])]);
        assert_eq!(eval(".[-10:10]", input.clone()), vec![json!([1, 2, 3])]);
        assert_eq!(eval(".[2:1]", input), vec![json!([])]);
    }

    #[test]
    fn strings_slice_by_character() {
        assert_eq!(eval(".[1:3]", json!("héllo")), vec![json!("él")]);
    }

    #[test]
    fn null_slices_to_null() {
        assert_eq!(eval(".[1:2]", json!(null)), vec![json!(null)]);
    }

    #[test]
    fn other_values_cannot_be_sliced() {
        assert_eq!(
            eval_err(".[1:2]", json!(5)).kind,
            EvalErrorKind::NotSliceable {
                type_name: "number"
            }
        );
        assert_eq!(eval(".[1:2]?", json!(5)), nothing());
    }

    #[test]
    fn bounds_must_be_numbers() {
        let err = eval_err(r#".["a":]"#, json!([1]));
        assert_eq!(
            err.kind,
            EvalErrorKind::TypeMismatch {
                type_name: "array",
                key_type: "string",
            }
        );
    }
}

mod calls {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn calling_a_non_function_fails_unless_optional() {
        assert_eq!(
            eval_err(".a()", json!({"a": 1})).kind,
            EvalErrorKind::NotCallable {
                type_name: "number"
            }
        );
        assert_eq!(eval(".a()?", json!({"a": 1})), nothing());
    }

    #[test]
    fn access_continues_on_call_results() {
        assert_eq!(
            eval("func f(): {a: [1, 2]} | f().a[1]", json!(null)),
            vec![json!(2)]
        );
    }

    #[test]
    fn selecting_from_a_constructed_value() {
        assert_eq!(eval("[10, 20, 30][1]", json!(null)), vec![json!(20)]);
        assert_eq!(eval("{a: 1}.a", json!(null)), vec![json!(1)]);
    }
}
