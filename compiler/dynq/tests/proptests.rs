//! Property-based tests.
//!
//! 1. Every generated boolean expression over a two-field record parses to a
//!    `Boolean` tree.
//! 2. Arbitrary input never panics the lexer or parser, and any error points
//!    inside the input.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use dynq::{parse, ParseOptions, Ty, TypeKind, TypeRegistry};
use proptest::prelude::*;

/// `class Pair { A: Int32, B: String }`
fn pair() -> (TypeRegistry, Ty) {
    let mut registry = TypeRegistry::new();
    let pair = registry.declare("Pair", TypeKind::Class);
    registry
        .def_mut(pair)
        .property("A", Ty::INT32)
        .property("B", Ty::STRING);
    (registry, Ty::Named(pair))
}

// -- Expression Generation Strategies --

fn comparison_op() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["==", "=", "!=", "<>", "<", "<=", ">", ">="])
}

fn int_term() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("A".to_owned()),
        any::<i32>().prop_map(|n| n.to_string()),
        (0u32..1000).prop_map(|n| format!("(A + {n})")),
        (1u32..100).prop_map(|n| format!("A * {n}")),
        Just("B.Length".to_owned()),
    ]
}

fn string_literal() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z ]{0,8}")
        .expect("valid regex")
        .prop_map(|s| format!("\"{s}\""))
}

fn bool_atom() -> impl Strategy<Value = String> {
    prop_oneof![
        (int_term(), comparison_op(), int_term()).prop_map(|(l, op, r)| format!("{l} {op} {r}")),
        (prop::sample::select(vec!["==", "!="]), string_literal())
            .prop_map(|(op, s)| format!("B {op} {s}")),
        string_literal().prop_map(|s| format!("B.StartsWith({s})")),
        Just("B == null".to_owned()),
        Just("true".to_owned()),
        Just("false".to_owned()),
    ]
}

fn bool_expr() -> impl Strategy<Value = String> {
    bool_atom().prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(vec!["&&", "||", "and", "or"]),
                inner.clone()
            )
                .prop_map(|(l, op, r)| format!("({l}) {op} ({r})")),
            inner.clone().prop_map(|e| format!("!({e})")),
            inner.clone().prop_map(|e| format!("not ({e})")),
            (inner.clone(), inner.clone(), inner)
                .prop_map(|(t, a, b)| format!("({t}) ? ({a}) : ({b})")),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn boolean_expressions_parse_to_boolean(text in bool_expr()) {
        let (registry, pair) = pair();
        let options = ParseOptions::new().implicit(pair).result_type(Ty::BOOL);
        match parse(&registry, &text, &options) {
            Ok(expr) => prop_assert_eq!(expr.ty, Ty::BOOL),
            Err(err) => prop_assert!(false, "{text}: {err}"),
        }
    }

    #[test]
    fn lexer_terminates_on_arbitrary_input(text in "\\PC{0,64}") {
        let _ = dynq::lexer::lex(&text);
    }

    #[test]
    fn parser_errors_point_inside_the_input(text in "[A-Za-z0-9 .,()\\[\\]+*/<>=!&|?:'\"@-]{0,40}") {
        let (registry, pair) = pair();
        let options = ParseOptions::new().implicit(pair);
        if let Err(err) = parse(&registry, &text, &options) {
            prop_assert!(err.position <= text.chars().count(), "{text}: {err}");
        }
    }
}
