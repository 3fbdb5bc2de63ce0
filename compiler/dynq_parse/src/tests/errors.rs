use dynq_ir::{Ty, Value};
use pretty_assertions::assert_eq;

use dynq_types::{TypeKind, TypeRegistry};

use super::fixture;
use crate::{parse, ParseErrorKind, ParseOptions};

fn expected(what: &'static str) -> ParseErrorKind {
    ParseErrorKind::Expected { what }
}

#[test]
fn syntax_errors() {
    let f = fixture();
    let cases = [
        ("", ParseErrorKind::ExpressionExpected, 0),
        ("Age +", ParseErrorKind::ExpressionExpected, 5),
        ("Age 5", ParseErrorKind::SyntaxError, 4),
        ("(Age", expected("')' or operator"), 4),
        ("Name.", expected("Identifier"), 5),
        ("Int32 + 1", expected("'.' or '('"), 6),
        ("Greet(\"a\"", expected("')' or ','"), 9),
        ("Tags[0", expected("']' or ','"), 6),
        (")", ParseErrorKind::ExpressionExpected, 0),
    ];
    for (text, kind, position) in cases {
        let err = f.error(text);
        assert_eq!((err.kind, err.position), (kind, position), "{text:?}");
    }
}

#[test]
fn lexical_errors() {
    let f = fixture();
    let cases = [
        ("Name == \"abc", ParseErrorKind::UnterminatedString, 12),
        ("Age # 1", ParseErrorKind::InvalidCharacter('#'), 4),
        ("1e", ParseErrorKind::DigitExpected, 2),
    ];
    for (text, kind, position) in cases {
        let err = f.error(text);
        assert_eq!((err.kind, err.position), (kind, position), "{text:?}");
    }
}

#[test]
fn positions_count_characters() {
    let f = fixture();
    let err = f.error("Name == \"é\" && Nope");
    assert_eq!(
        err.kind,
        ParseErrorKind::UnknownPropertyOrField {
            member: "Nope".into(),
            ty: "Person".into(),
        }
    );
    assert_eq!(err.position, 15);
}

#[test]
fn unknown_names() {
    let f = fixture();
    let options = ParseOptions::new().param("p", f.person.clone());

    let err = f.parse_with("foo", &options).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnknownIdentifier("foo".into()));
    assert_eq!(err.position, 0);

    let err = f.parse_with("p.Age > 1 && it.Age > 1", &options).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::NoItInScope);
    assert_eq!(err.position, 13);

    let err = f.error("Boss.Nope");
    assert_eq!(
        err.kind,
        ParseErrorKind::UnknownPropertyOrField {
            member: "Nope".into(),
            ty: "Person".into(),
        }
    );
    assert_eq!(err.position, 5);
}

#[test]
fn method_errors() {
    let f = fixture();

    let err = f.error("Name.Foo()");
    assert_eq!(
        err.kind,
        ParseErrorKind::NoApplicableMethod {
            method: "Foo".into(),
            ty: "String".into(),
        }
    );
    assert_eq!(err.position, 5);

    let err = f.error("Pick(1, 2)");
    assert_eq!(
        err.kind,
        ParseErrorKind::AmbiguousMethodInvocation {
            method: "Pick".into(),
            ty: "Person".into(),
        }
    );
    assert_eq!(err.position, 0);

    let err = f.error("Reset()");
    assert_eq!(
        err.kind,
        ParseErrorKind::MethodIsVoid {
            method: "Reset".into(),
            ty: "Person".into(),
        }
    );

    let err = f.error("Friends.Any(Name)");
    assert_eq!(err.kind, ParseErrorKind::NoApplicableAggregate("Any".into()));
    assert_eq!(err.position, 8);
}

#[test]
fn indexer_errors() {
    let f = fixture();
    let cases = [
        ("Tags[0, 1]", ParseErrorKind::CannotIndexMultiDimArray, 4),
        ("Tags[\"a\"]", ParseErrorKind::InvalidIndex, 4),
        (
            "Library[1]",
            ParseErrorKind::NoApplicableIndexer("Catalog".into()),
            7,
        ),
        ("Age[0]", ParseErrorKind::NoApplicableIndexer("Int32".into()), 3),
    ];
    for (text, kind, position) in cases {
        let err = f.error(text);
        assert_eq!((err.kind, err.position), (kind, position), "{text:?}");
    }
}

#[test]
fn crossed_overloads_are_ambiguous() {
    let mut registry = TypeRegistry::new();
    let pair = registry.declare("Pair", TypeKind::Struct);
    registry
        .def_mut(pair)
        .accessible()
        .constructor(&[Ty::INT64, Ty::INT32])
        .constructor(&[Ty::INT32, Ty::INT64])
        .indexer(&[Ty::INT64, Ty::INT32], Ty::STRING)
        .indexer(&[Ty::INT32, Ty::INT64], Ty::STRING);
    let options = ParseOptions::new().implicit(Ty::Named(pair));

    let err = parse(&registry, "Pair(1, 2)", &options).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::AmbiguousConstructorInvocation("Pair".into())
    );
    assert_eq!(err.position, 0);

    let err = parse(&registry, "it[1, 2]", &options).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::AmbiguousIndexerInvocation("Pair".into())
    );
    assert_eq!(err.position, 2);
}

#[test]
fn mutually_convertible_branches_are_rejected() {
    let mut registry = TypeRegistry::new();
    let node = registry.declare("Node", TypeKind::Class);
    let link = registry.declare("Link", TypeKind::Class);
    let holder = registry.declare("Holder", TypeKind::Class);
    registry.def_mut(node).base(Ty::Named(link));
    registry.def_mut(link).base(Ty::Named(node));
    registry
        .def_mut(holder)
        .property("Active", Ty::BOOL)
        .property("First", Ty::Named(node))
        .property("Second", Ty::Named(link));
    let options = ParseOptions::new().implicit(Ty::Named(holder));

    let err = parse(&registry, "Active ? First : Second", &options).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::BothTypesConvertToOther("Node".into(), "Link".into())
    );
    assert_eq!(err.position, 0);
}

#[test]
fn type_access_errors() {
    let f = fixture();
    let cases = [
        (
            "String?(Name)",
            ParseErrorKind::TypeHasNoNullableForm("String".into()),
        ),
        (
            "Guid(1)",
            ParseErrorKind::CannotConvertValue("Int32".into(), "Guid".into()),
        ),
        (
            "Guid(1, 2)",
            ParseErrorKind::NoMatchingConstructor("Guid".into()),
        ),
    ];
    for (text, kind) in cases {
        let err = f.error(text);
        assert_eq!((err.kind, err.position), (kind, 0), "{text:?}");
    }
}

#[test]
fn option_errors() {
    let f = fixture();

    let options = ParseOptions::new()
        .implicit(f.person.clone())
        .constant(Value::Int32(18), Ty::INT32);
    let err = f.parse_with("Age > @1", &options).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnknownSubstitutionValue(1));
    assert_eq!(err.position, 6);

    let options = ParseOptions::new()
        .param("x", Ty::INT32)
        .param("X", Ty::INT64);
    let err = f.parse_with("x", &options).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::DuplicateIdentifier("X".into()));
    assert_eq!(err.position, 0);

    let options = ParseOptions::new()
        .implicit(f.person.clone())
        .result_type(Ty::BOOL);
    let err = f.parse_with("Age + 1", &options).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::ExpressionTypeMismatch("Boolean".into())
    );
    assert_eq!(err.position, 0);
}

#[test]
fn error_display_includes_position() {
    let f = fixture();
    assert_eq!(f.error("Age +").to_string(), "Expression expected (at index 5)");
    assert_eq!(
        f.error("Nope").to_string(),
        "No property or field 'Nope' exists in type 'Person' (at index 0)"
    );
}

#[test]
fn deep_nesting_does_not_overflow() {
    let f = fixture();
    let depth = 2000;
    let text = format!("{}Age{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(f.render(&text), "$0.Age");

    let text = format!("{}Active", "!".repeat(depth));
    assert_eq!(f.parse(&text).unwrap().ty, Ty::BOOL);
}
