//! Expression promotion and explicit conversion.

use dynq_ir::{Expr, Prim, Ty, Value};

use crate::literal::{parse_enum, parse_number};
use crate::TypeCx;

/// Promote `expr` to `target`, or `None` if that is not possible.
///
/// - the untyped `null` literal becomes a typed null for reference and
///   nullable targets
/// - literals with pending source text are re-parsed into the target type
/// - otherwise implicitly compatible expressions are wrapped in a `Convert`
///   node when the target is a value type or `exact` is set
///
/// The input is never modified; a literal promoted at two use sites yields
/// two independent constants.
pub fn promote(cx: TypeCx<'_>, expr: &Expr, target: &Ty, exact: bool) -> Option<Expr> {
    if expr.ty == *target {
        return Some(expr.clone());
    }
    if expr.is_null_literal() {
        return (!cx.is_value_type(target) || target.is_nullable())
            .then(|| Expr::constant(Value::Null, target.clone(), expr.span));
    }
    if let Some(pending) = expr.pending_literal() {
        if let Some(value) = retype_literal(cx, &expr.ty, &pending.text, target) {
            tracing::trace!(text = %pending.text, target = %target, "re-typed literal");
            return Some(Expr::constant(value, target.clone(), expr.span));
        }
    }
    if cx.is_compatible(&expr.ty, target) {
        if cx.is_value_type(target) || exact {
            return Some(expr.clone().convert(target.clone()));
        }
        return Some(expr.clone());
    }
    None
}

/// Re-parse pending literal text as `target` (or the type it makes
/// nullable).
fn retype_literal(cx: TypeCx<'_>, guessed: &Ty, text: &str, target: &Ty) -> Option<Value> {
    let inner = target.non_nullable();
    match guessed.as_prim()? {
        Prim::Int32 | Prim::UInt32 | Prim::Int64 | Prim::UInt64 => {
            parse_number(text, inner.as_prim()?)
        }
        Prim::Double if *inner == Ty::DECIMAL => parse_number(text, Prim::Decimal),
        Prim::String => {
            if let Some(def) = cx.enum_def(inner) {
                return parse_enum(text, inner, def);
            }
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if *inner == Ty::CHAR => Some(Value::Char(c)),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Explicit conversion `Type(expr)`.
///
/// Allows nullable wrapping/unwrapping, checked conversion between numeric
/// and enum types, and reference conversions in either direction.
pub fn explicit_conversion(cx: TypeCx<'_>, expr: &Expr, target: &Ty) -> Option<Expr> {
    let source = &expr.ty;
    if source == target {
        return Some(expr.clone());
    }
    if cx.is_value_type(source) && cx.is_value_type(target) {
        if (source.is_nullable() || target.is_nullable())
            && source.non_nullable() == target.non_nullable()
        {
            return Some(expr.clone().convert(target.clone()));
        }
        if (cx.is_numeric(source) || cx.is_enum(source))
            && (cx.is_numeric(target) || cx.is_enum(target))
        {
            return Some(expr.clone().convert_checked(target.clone()));
        }
    }
    if cx.is_assignable(target, source)
        || cx.is_assignable(source, target)
        || cx.is_interface(source)
        || cx.is_interface(target)
    {
        return Some(expr.clone().convert(target.clone()));
    }
    None
}
