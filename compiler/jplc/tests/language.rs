//! End-to-end behavior of the language through the public entry points.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use jplc::{evaluate, parse, normalize, strip_values, EvalErrorKind, JplError, Program};
use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;
use serde_json::json;

#[track_caller]
fn run(source: &str, input: serde_json::Value) -> Vec<serde_json::Value> {
    Program::new(source)
        .and_then(|program| program.run_json(input))
        .unwrap_or_else(|err| panic!("{source}: {err}"))
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    for input in [json!(null), json!({"a": [1]}), json!("text")] {
        assert_eq!(run("1 + 2 * 3", input), vec![json!(7)]);
    }
}

#[test]
fn conditionals() {
    assert_eq!(run("if true then 1 else 2 end", json!(null)), vec![json!(1)]);
    assert_eq!(run("if false then 1 end", json!({"a": 1})), vec![json!({"a": 1})]);
}

#[test]
fn try_and_suppression() {
    assert_eq!(run(r#"try (1/0) catch "err""#, json!(null)), vec![json!("err")]);
    for input in [json!(null), json!([1, 2]), json!({"x": true})] {
        assert_eq!(run("(1/0)?", input), Vec::<serde_json::Value>::new());
    }
}

#[test]
fn bindings_are_scoped_to_their_pipeline() {
    assert_eq!(run("x = 1 | x + 1", json!(null)), vec![json!(2)]);
    let err = Program::new("[x = 1 | x] | x")
        .unwrap()
        .run_json(json!(null))
        .unwrap_err();
    let JplError::Eval(err) = err else {
        panic!("expected an evaluation error, got {err:?}");
    };
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "x".to_owned()
        }
    );
}

#[test]
fn closures_capture_at_definition() {
    assert_eq!(
        run("y = 10 | func add(a, b): a + b + y | y = 0 | add(1, 2)", json!(null)),
        vec![json!(13)]
    );
}

#[test]
fn primitive_entry_points_agree_with_program() {
    let input = json!({"items": [1, 2]});
    let pipeline = parse(".items[]").unwrap();
    let outputs = evaluate(&pipeline, normalize(input.clone()), &FxHashMap::default()).unwrap();
    assert_eq!(strip_values(&outputs).unwrap(), run(".items[]", input));
}

#[test]
fn presets_are_the_only_outer_variables() {
    let mut presets = FxHashMap::default();
    presets.insert("limit".to_owned(), normalize(json!(2)));
    let pipeline = parse(r#"[.[] | if . <= limit then . else "big" end]"#).unwrap();
    let outputs = evaluate(&pipeline, normalize(json!([1, 2, 3])), &presets).unwrap();
    assert_eq!(strip_values(&outputs).unwrap(), vec![json!([1, 2, "big"])]);

    let err = evaluate(&pipeline, normalize(json!([1])), &FxHashMap::default()).unwrap_err();
    assert!(matches!(
        err,
        JplError::Eval(ref err) if err.kind == EvalErrorKind::UndefinedVariable { name: "limit".to_owned() }
    ));
}

#[test]
fn documents_are_rewritten_without_touching_the_input() {
    let program = Program::new(".users[].active |= not .").unwrap();
    let input = normalize(json!({"users": [{"active": true}, {"active": false}]}));
    let outputs = program.run(input.clone()).unwrap();
    assert_eq!(
        strip_values(&outputs).unwrap(),
        vec![json!({"users": [{"active": false}, {"active": true}]})]
    );
    assert_eq!(
        jplc::strip(&input).unwrap(),
        json!({"users": [{"active": true}, {"active": false}]})
    );
}

#[test]
fn a_realistic_report() {
    let source = r#"
        # order totals; rows with a malformed price get a null total
        rows = [.orders[] | {category, total: try (.price * .qty) catch null}]
        | {
            first: "\(rows[0].category): \(rows[0].total)",
            totals: [rows[] | .total ?? "none"]
          }
    "#;
    let input = json!({
        "orders": [
            {"category": "tools", "price": 3, "qty": 2},
            {"category": "food", "price": "?", "qty": "one"},
        ]
    });
    assert_eq!(
        run(source, input),
        vec![json!({"first": "tools: 6", "totals": [6, "none"]})]
    );
}
