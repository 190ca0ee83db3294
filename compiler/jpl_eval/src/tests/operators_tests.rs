//! Tests for binary operators.

use jpl_ir::{ArithmeticOp, ComparisonOp};
use jpl_value::{EvalErrorKind, Heap, Value, MAX_COLLECTION_LEN};
use serde_json::json;

use super::{eval, eval_err};
use crate::{evaluate_arithmetic, evaluate_comparison};

fn num(n: f64) -> Value {
    Value::Number(n)
}

mod addition {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers_add() {
        let sum = evaluate_arithmetic(ArithmeticOp::Addition, num(1.0), num(2.0)).unwrap();
        assert_eq!(sum, num(3.0));
    }

    #[test]
    fn null_is_the_identity_on_either_side() {
        let a = Value::string("a");
        assert_eq!(
            evaluate_arithmetic(ArithmeticOp::Addition, Value::Null, a.clone()).unwrap(),
            a
        );
        assert_eq!(
            evaluate_arithmetic(ArithmeticOp::Addition, a.clone(), Value::Null).unwrap(),
            a
        );
    }

    #[test]
    fn strings_and_arrays_concatenate() {
        assert_eq!(eval(r#""ab" + "cd""#, json!(null)), vec![json!("abcd")]);
        assert_eq!(eval("[1] + [2, 3]", json!(null)), vec![json!([1, 2, 3])]);
    }

    #[test]
    fn adding_an_empty_array_keeps_the_left_side() {
        let left = Value::array(vec![num(1.0)]);
        let Value::Array(before) = &left else {
            unreachable!()
        };
        let before = before.clone();
        let sum =
            evaluate_arithmetic(ArithmeticOp::Addition, left, Value::empty_array()).unwrap();
        let Value::Array(after) = &sum else {
            panic!("expected an array, got {sum:?}")
        };
        assert!(Heap::ptr_eq(&before, after));
    }

    #[test]
    fn objects_merge_shallowly() {
        assert_eq!(
            eval(". + {a: {y: 2}}", json!({"a": {"x": 1}, "b": 1})),
            vec![json!({"a": {"y": 2}, "b": 1})]
        );
    }

    #[test]
    fn mismatched_operands_fail() {
        let err = eval_err(r#"1 + "a""#, json!(null));
        assert_eq!(
            err.kind,
            EvalErrorKind::InvalidOperand {
                op: "+",
                left: "number",
                right: "string",
            }
        );
        assert_eq!(err.message, "cannot apply `+` to number and string");
    }
}

mod subtraction {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers_subtract() {
        assert_eq!(eval("10 - 4 - 3", json!(null)), vec![json!(3)]);
    }

    #[test]
    fn arrays_remove_every_matching_element() {
        assert_eq!(eval("[1, 2, 3, 2] - [2]", json!(null)), vec![json!([1, 3])]);
        assert_eq!(eval("[1, 2] - []", json!(null)), vec![json!([1, 2])]);
    }

    #[test]
    fn objects_cannot_be_subtracted() {
        let err = eval_err("{} - 1", json!(null));
        assert_eq!(err.message, "cannot apply `-` to object and number");
    }
}

mod multiplication {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn binds_tighter_than_addition() {
        assert_eq!(eval("1 + 2 * 3", json!(null)), vec![json!(7)]);
        assert_eq!(eval("1 + 2 * 3", json!({"any": "input"})), vec![json!(7)]);
    }

    #[test]
    fn strings_repeat() {
        assert_eq!(eval(r#""ab" * 3"#, json!(null)), vec![json!("ababab")]);
        assert_eq!(eval(r#"2 * "ab""#, json!(null)), vec![json!("abab")]);
        assert_eq!(eval(r#""ab" * 0"#, json!(null)), vec![json!(null)]);
    }

    #[test]
    fn oversized_repetition_is_recoverable() {
        let err = eval_err(r#""ab" * 1e19"#, json!(null));
        assert_eq!(
            err.kind,
            EvalErrorKind::SizeLimitExceeded {
                limit: MAX_COLLECTION_LEN
            }
        );
        assert!(err.is_catchable());
        assert_eq!(
            eval(r#"try ("ab" * 1e19) catch "too big""#, json!(null)),
            vec![json!("too big")]
        );
        assert_eq!(eval(r#""" * 1e19"#, json!(null)), vec![json!("")]);
    }

    #[test]
    fn objects_merge_deeply() {
        assert_eq!(
            eval(". * {a: {y: 2}, c: 3}", json!({"a": {"x": 1}, "b": 1})),
            vec![json!({"a": {"x": 1, "y": 2}, "b": 1, "c": 3})]
        );
    }

    #[test]
    fn deep_merge_replaces_non_objects() {
        assert_eq!(
            eval(". * {a: 1}", json!({"a": {"x": 1}})),
            vec![json!({"a": 1})]
        );
    }
}

mod division {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers_divide() {
        assert_eq!(eval("7 / 2", json!(null)), vec![json!(3.5)]);
    }

    #[test]
    fn by_zero_is_recoverable() {
        let err = eval_err("1 / 0", json!(null));
        assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
        assert!(err.is_catchable());
    }

    #[test]
    fn strings_split() {
        assert_eq!(
            eval(r#""a,b,c" / ",""#, json!(null)),
            vec![json!(["a", "b", "c"])]
        );
        assert_eq!(eval(r#""abc" / """#, json!(null)), vec![json!(["a", "b", "c"])]);
        assert_eq!(eval(r#""" / ",""#, json!(null)), vec![json!([])]);
    }
}

mod remainder {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_the_sign_of_the_dividend() {
        assert_eq!(eval("-7 % 3", json!(null)), vec![json!(-1)]);
        assert_eq!(eval("7 % -3", json!(null)), vec![json!(1)]);
    }

    #[test]
    fn by_zero_is_recoverable() {
        assert_eq!(eval_err("7 % 0", json!(null)).kind, EvalErrorKind::DivisionByZero);
    }
}

mod comparison {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn orders_by_type_first() {
        assert!(evaluate_comparison(
            ComparisonOp::Less,
            &Value::Null,
            &Value::Bool(false)
        ));
        assert!(evaluate_comparison(
            ComparisonOp::Less,
            &num(100.0),
            &Value::string("a")
        ));
        assert!(evaluate_comparison(
            ComparisonOp::GreaterEqual,
            &Value::empty_object(),
            &Value::empty_array()
        ));
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(eval("[1, {a: 2}] == [1, {a: 2}]", json!(null)), vec![json!(true)]);
        assert_eq!(eval("1 != 1.0", json!(null)), vec![json!(false)]);
    }

    #[test]
    fn nan_equals_only_nan() {
        let nan = Value::Number(f64::NAN);
        assert!(!evaluate_comparison(ComparisonOp::Equal, &nan, &num(1.0)));
        assert!(evaluate_comparison(ComparisonOp::Equal, &nan, &nan));
        assert!(evaluate_comparison(ComparisonOp::Less, &nan, &num(f64::NEG_INFINITY)));
        assert_eq!(eval("(1e400 - 1e400) == 1", json!(null)), vec![json!(false)]);
    }

    #[test]
    fn chains_fold_left_to_right() {
        assert_eq!(eval("1 < 2 == true", json!(null)), vec![json!(true)]);
        assert_eq!(eval("3 > 2 > 1", json!(null)), vec![json!(false)]);
    }

    #[test]
    fn every_operand_sees_the_original_input() {
        assert_eq!(eval(". + 1 < . * 3", json!(2)), vec![json!(true)]);
    }

    #[test]
    fn operand_outputs_multiply_out() {
        assert_eq!(
            eval("(1, 2) + (10, 20)", json!(null)),
            vec![json!(11), json!(21), json!(12), json!(22)]
        );
    }
}
