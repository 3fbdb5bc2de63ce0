use dynq_ir::visitor::{walk_expr, Visitor};
use dynq_ir::{AggregateOp, Expr, ExprKind, MemberSig, ParamRef, Span, Ty, Value};
use pretty_assertions::assert_eq;

use super::fixture;
use crate::{MemberHook, ParseOptions};

#[test]
fn implicit_members() {
    let f = fixture();
    assert_eq!(f.render("Name"), "$0.Name");
    assert_eq!(f.render("it.Name"), "$0.Name");
    assert_eq!(f.render("name.length"), "$0.Name.Length");
    assert_eq!(f.render("Boss.Boss.Age"), "$0.Boss.Boss.Age");
    assert_eq!(f.parse("Score.HasValue").unwrap().ty, Ty::BOOL);
    assert_eq!(f.parse("Score.Value").unwrap().ty, Ty::DOUBLE);
    assert_eq!(f.parse("Tags.Length").unwrap().ty, Ty::INT32);
}

#[test]
fn member_spans_cover_the_whole_access() {
    let f = fixture();
    let expr = f.parse("Boss.Name").unwrap();
    assert_eq!(expr.span, Span::new(0, 9));

    let expr = f.parse("Age > 1 && Name == \"x\"").unwrap();
    let ExprKind::Binary { right, .. } = &expr.kind else {
        panic!("expected binary, got {expr}");
    };
    let ExprKind::Binary { left: name, .. } = &right.kind else {
        panic!("expected binary, got {right}");
    };
    assert_eq!(name.span, Span::new(11, 15));
}

#[test]
fn named_parameters() {
    let f = fixture();
    let options = ParseOptions::new()
        .param("p", f.person.clone())
        .param("limit", Ty::INT32);
    let expr = f.parse_with("p.Age > limit", &options).unwrap();
    assert_eq!(expr.to_string(), "(p.Age > limit)");

    let expr = f.parse_with("P.age > LIMIT", &options).unwrap();
    assert_eq!(expr.to_string(), "(p.Age > limit)");
}

#[test]
fn escaped_identifiers_skip_keywords() {
    let f = fixture();
    let options = ParseOptions::new().param("null", Ty::INT32);
    let expr = f.parse_with("@null + 1", &options).unwrap();
    assert_eq!(expr.to_string(), "(null + 1)");
    assert_eq!(f.render("@Name"), "$0.Name");
}

#[test]
fn method_calls() {
    let f = fixture();
    assert_eq!(f.render("Greet(\"hi\")"), "$0.Greet(\"hi\")");
    assert_eq!(f.render("Name.ToUpper()"), "$0.Name.ToUpper()");
    assert_eq!(f.render("Name.Substring(1, 2)"), "$0.Name.Substring(1, 2)");
    assert_eq!(f.parse("Name.Contains(\"x\")").unwrap().ty, Ty::BOOL);
    assert_eq!(f.parse("Birth.AddDays(1)").unwrap().ty, Ty::DATE_TIME);
    assert_eq!(f.parse("Age.ToString()").unwrap().ty, Ty::STRING);
}

#[test]
fn method_arguments_are_promoted() {
    let f = fixture();
    let expr = f.parse("Birth.AddDays(Age)").unwrap();
    assert_eq!(expr.to_string(), "$0.Birth.AddDays(Convert<Double>($0.Age))");

    let expr = f.parse("Birth.AddDays(2)").unwrap();
    let ExprKind::Call { args, .. } = &expr.kind else {
        panic!("expected call, got {expr}");
    };
    assert_eq!(args[0].as_constant(), Some(&Value::Double(2.0)));
}

#[test]
fn static_members_and_methods() {
    let f = fixture();
    assert_eq!(f.render("Int32.MaxValue"), "Int32.MaxValue");
    assert_eq!(f.parse("int.MaxValue").unwrap().ty, Ty::INT32);
    assert_eq!(f.render("DateTime.Now"), "DateTime.Now");
    assert_eq!(
        f.render("String.IsNullOrEmpty(Name)"),
        "String.IsNullOrEmpty($0.Name)"
    );
    assert_eq!(f.render("Math.Max(Age, 3)"), "type#0.Max($0.Age, 3)");
    assert_eq!(f.parse("Math.Max(Age, 3)").unwrap().ty, Ty::INT32);
    assert_eq!(f.parse("Math.Sqrt(Age)").unwrap().ty, Ty::DOUBLE);
    assert_eq!(f.parse("TimeSpan.FromDays(1)").unwrap().ty, Ty::TIME_SPAN);
    assert_eq!(
        f.parse("Char.IsDigit(Name[0])").unwrap().ty,
        Ty::BOOL
    );
}

#[test]
fn enum_values_through_the_type_name() {
    let f = fixture();
    let expr = f.parse("Access.write").unwrap();
    assert_eq!(expr.ty, f.access);
    let Some(Value::Enum { name, value, .. }) = expr.as_constant() else {
        panic!("expected enum constant, got {expr}");
    };
    assert_eq!((name.as_str(), *value), ("Write", 2));
    assert_eq!(expr.to_string(), "Write");

    assert_eq!(f.parse("Color.Blue").unwrap().ty, f.color);
    assert_eq!(f.parse("Favorite == Color.Blue").unwrap().ty, Ty::BOOL);
}

#[test]
fn string_literals_convert_to_enums() {
    let f = fixture();
    let expr = f.parse("Favorite == \"Green\"").unwrap();
    assert_eq!(expr.ty, Ty::BOOL);
}

#[test]
fn constructors_and_conversions() {
    let f = fixture();
    assert_eq!(
        f.render("DateTime(2020, 1, 1)"),
        "new DateTime(2020, 1, 1)"
    );
    assert_eq!(f.parse("DateTime(2020, 1, 1)").unwrap().ty, Ty::DATE_TIME);
    assert_eq!(f.render("Int64(Age)"), "ConvertChecked<Int64>($0.Age)");
    assert_eq!(f.render("Int32?(Age)"), "Convert<Int32?>($0.Age)");
    assert_eq!(f.render("Int32(Score.Value)"), "ConvertChecked<Int32>($0.Score.Value)");
    assert_eq!(
        f.parse("Int32(Rights)").unwrap().ty,
        Ty::INT32
    );
    assert_eq!(f.parse("Access(1)").unwrap().ty, f.access);
}

#[test]
fn aggregates_bind_a_fresh_it() {
    let f = fixture();
    assert_eq!(
        f.render("Friends.Any(Age > 30)"),
        "$0.Friends.Any(($1) => ($1.Age > 30))"
    );
    assert_eq!(f.render("Friends.Any()"), "$0.Friends.Any()");
    assert_eq!(
        f.render("Tags.Any(it == \"x\")"),
        "$0.Tags.Any(($1) => ($1 == \"x\"))"
    );

    let expr = f.parse("Friends.Any(Age > 30)").unwrap();
    assert_eq!(expr.ty, Ty::BOOL);
    let ExprKind::Aggregate {
        element,
        op,
        type_args,
        args,
        ..
    } = &expr.kind
    else {
        panic!("expected aggregate, got {expr}");
    };
    assert_eq!(element, &f.person);
    assert_eq!(*op, AggregateOp::Any);
    assert_eq!(type_args, &vec![f.person.clone()]);
    assert_eq!(args[0].ty, Ty::func(vec![f.person.clone()], Ty::BOOL));
}

#[test]
fn aggregates_see_outer_parameters() {
    let f = fixture();
    let options = ParseOptions::new().param("p", f.person.clone());
    let expr = f
        .parse_with("p.Friends.Any(Age > p.Age)", &options)
        .unwrap();
    assert_eq!(expr.to_string(), "p.Friends.Any(($1) => ($1.Age > p.Age))");
}

#[test]
fn nested_aggregates_get_distinct_parameters() {
    let f = fixture();
    assert_eq!(
        f.render("Friends.Any(Friends.Any(Age > 1))"),
        "$0.Friends.Any(($1) => $1.Friends.Any(($2) => ($2.Age > 1)))"
    );
    // `it` is restored once the inner argument list closes
    assert_eq!(
        f.render("Friends.Any(Active) && Age > 1"),
        "($0.Friends.Any(($1) => $1.Active) && ($0.Age > 1))"
    );
}

/// Ids of lambda parameter declarations, in visit order.
#[derive(Default)]
struct LambdaParams(Vec<u32>);

impl<'e> Visitor<'e> for LambdaParams {
    fn visit_expr(&mut self, expr: &'e Expr) {
        if let ExprKind::Lambda { params, .. } = &expr.kind {
            self.0.extend(params.iter().map(|p: &ParamRef| p.id));
        }
        walk_expr(self, expr);
    }
}

#[test]
fn sibling_aggregates_never_share_parameters() {
    let f = fixture();
    let expr = f
        .parse("Friends.Any(Friends.Any(Active)) && Friends.Any(Age > 1)")
        .unwrap();
    let mut params = LambdaParams::default();
    params.visit_expr(&expr);
    assert_eq!(params.0, vec![1, 2, 3]);
}

#[test]
fn aggregates_chain() {
    let f = fixture();
    let expr = f.parse("Friends.Where(Active).Count()").unwrap();
    assert_eq!(
        expr.to_string(),
        "$0.Friends.Where(($1) => $1.Active).Count()"
    );
    assert_eq!(expr.ty, Ty::INT32);
    assert_eq!(
        f.parse("Friends.Where(Active)").unwrap().ty,
        Ty::seq(f.person.clone())
    );
}

#[test]
fn min_and_max_keep_the_selector_type() {
    let f = fixture();
    let expr = f.parse("Friends.Max(Age)").unwrap();
    assert_eq!(expr.ty, Ty::INT32);
    let ExprKind::Aggregate { type_args, .. } = &expr.kind else {
        panic!("expected aggregate, got {expr}");
    };
    assert_eq!(type_args, &vec![f.person.clone(), Ty::INT32]);

    assert_eq!(f.parse("Friends.Min(Name)").unwrap().ty, Ty::STRING);
}

#[test]
fn element_access() {
    let f = fixture();
    assert_eq!(f.render("Tags[0]"), "$0.Tags[0]");
    assert_eq!(f.parse("Tags[0]").unwrap().ty, Ty::STRING);
    assert_eq!(f.render("Library[\"x\"].Name"), "$0.Library[\"x\"].Name");
    assert_eq!(f.parse("Library").unwrap().ty, f.catalog);
    assert_eq!(f.parse("Name[1]").unwrap().ty, Ty::CHAR);

    let expr = f.parse("Tags[Age]").unwrap();
    let ExprKind::Index { indexer, args, .. } = &expr.kind else {
        panic!("expected index, got {expr}");
    };
    assert!(indexer.is_none());
    assert_eq!(args[0].ty, Ty::INT32);
}

#[test]
fn hook_resolves_unknown_members() {
    let f = fixture();
    let hook = |ty: &Ty, name: &str, instance: Option<&Expr>| -> Option<Expr> {
        name.eq_ignore_ascii_case("Nickname").then(|| {
            let member = MemberSig::property(ty.clone(), "Nickname", Ty::STRING);
            Expr::member(instance.cloned(), member, Span::DUMMY)
        })
    };
    let options = ParseOptions::new()
        .implicit(f.person.clone())
        .hook(&hook);
    let expr = f.parse_with("Nickname == Name", &options).unwrap();
    assert_eq!(expr.to_string(), "($0.Nickname == $0.Name)");
    assert!(f.parse_with("Nope", &options).is_err());
}

#[test]
fn hook_is_not_consulted_for_known_members() {
    struct Panicking;
    impl MemberHook for Panicking {
        fn resolve_member(&self, _: &Ty, name: &str, _: Option<&Expr>) -> Option<Expr> {
            panic!("hook consulted for {name}");
        }
    }
    let f = fixture();
    let options = ParseOptions::new()
        .implicit(f.person.clone())
        .hook(&Panicking);
    assert!(f.parse_with("Name.Length", &options).is_ok());
}
