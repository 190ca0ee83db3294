//! Printing a parsed program and parsing it again must not change what it
//! computes.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use jplc::Program;
use proptest::prelude::*;
use serde_json::json;

/// Outputs, or the error message, for comparison across programs.
fn outcome(program: &Program, input: &serde_json::Value) -> Result<Vec<serde_json::Value>, String> {
    program.run_json(input.clone()).map_err(|err| err.to_string())
}

fn program() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        Just(".".to_owned()),
        Just(".a".to_owned()),
        Just(".b[]".to_owned()),
        Just(".b[-1]?".to_owned()),
        Just(".b[1:]".to_owned()),
        Just("null".to_owned()),
        Just(r#""s""#.to_owned()),
        (0u8..10).prop_map(|n| n.to_string()),
    ];
    leaf.prop_recursive(4, 48, 3, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}) + ({b})")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}) - ({b})")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}) < ({b})")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}), ({b})")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}) | ({b})")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}) ?? ({b})")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}) and ({b})")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("try ({a}) catch ({b})")),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(c, t, e)| format!("if ({c}) then ({t}) else ({e}) end")),
            inner.clone().prop_map(|a| format!("[{a}]")),
            inner.clone().prop_map(|a| format!("{{k: ({a}), \"m\"?: .a}}")),
            inner.clone().prop_map(|a| format!("\"<\\({a})>\"")),
            inner.clone().prop_map(|a| format!("({a})?")),
            inner.clone().prop_map(|a| format!("not ({a})")),
            inner.clone().prop_map(|a| format!(".a |= ({a})")),
            inner.clone().prop_map(|a| format!(".b[0] += ({a})")),
            inner.clone().prop_map(|a| format!("x = ({a}) | [x, .]")),
            inner.prop_map(|a| format!("func f(v): [v, ({a})] | f(.a)")),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn printed_programs_compute_the_same(source in program()) {
        let original = Program::new(source.as_str()).unwrap();
        let printed = original.to_source();
        let reparsed = Program::new(printed.as_str())
            .unwrap_or_else(|err| panic!("{printed:?} does not parse: {err}"));
        for input in [json!(null), json!({"a": 1, "b": [2, 3]}), json!({"a": "t", "b": []})] {
            prop_assert_eq!(outcome(&original, &input), outcome(&reparsed, &input));
        }
    }
}
