//! Literal typing: first guesses at lex time, exact re-parses at use sites.
//!
//! A numeric literal is typed by a guess (the smallest fitting integer type,
//! or `Double` for unsuffixed reals). When overload resolution later needs it
//! as a specific type, the original text is parsed again straight into that
//! type. Going through the guessed value instead would lose precision
//! (`Decimal` from `Double`) or range (`UInt64` from `Int64`).

use std::str::FromStr;

use dynq_ir::{Prim, Ty, Value};
use rust_decimal::Decimal;

use crate::registry::EnumDef;

/// Type an integer literal by the smallest type that holds it.
///
/// Non-negative literals try `Int32`, `UInt32`, `Int64`, then `UInt64`.
/// Negative literals (with a folded `-`) try `Int32` then `Int64`.
pub fn guess_int_literal(text: &str) -> Option<(Value, Ty)> {
    if text.starts_with('-') {
        let value: i64 = text.parse().ok()?;
        return Some(match i32::try_from(value) {
            Ok(v) => (Value::Int32(v), Ty::INT32),
            Err(_) => (Value::Int64(value), Ty::INT64),
        });
    }
    let value: u64 = text.parse().ok()?;
    Some(if let Ok(v) = i32::try_from(value) {
        (Value::Int32(v), Ty::INT32)
    } else if let Ok(v) = u32::try_from(value) {
        (Value::UInt32(v), Ty::UINT32)
    } else if let Ok(v) = i64::try_from(value) {
        (Value::Int64(v), Ty::INT64)
    } else {
        (Value::UInt64(value), Ty::UINT64)
    })
}

/// Type a real literal by its suffix: `F` is `Single`, `M` is `Decimal`,
/// `D` or none is `Double`.
pub fn guess_real_literal(text: &str) -> Option<(Value, Ty)> {
    let (digits, prim) = match text.chars().last() {
        Some('f' | 'F') => (&text[..text.len() - 1], Prim::Single),
        Some('m' | 'M') => (&text[..text.len() - 1], Prim::Decimal),
        Some('d' | 'D') => (&text[..text.len() - 1], Prim::Double),
        _ => (text, Prim::Double),
    };
    let value = parse_number(digits, prim)?;
    Some((value, Ty::Prim(prim)))
}

/// Parse literal text directly into `target`.
///
/// Any real-literal suffix is ignored. `Char` targets accept a UTF-16 code
/// unit value that is a valid scalar.
pub(crate) fn parse_number(text: &str, target: Prim) -> Option<Value> {
    let digits = text.trim_end_matches(['f', 'F', 'm', 'M', 'd', 'D']);
    Some(match target {
        Prim::SByte => Value::SByte(digits.parse().ok()?),
        Prim::Byte => Value::Byte(digits.parse().ok()?),
        Prim::Int16 => Value::Int16(digits.parse().ok()?),
        Prim::UInt16 => Value::UInt16(digits.parse().ok()?),
        Prim::Int32 => Value::Int32(digits.parse().ok()?),
        Prim::UInt32 => Value::UInt32(digits.parse().ok()?),
        Prim::Int64 => Value::Int64(digits.parse().ok()?),
        Prim::UInt64 => Value::UInt64(digits.parse().ok()?),
        Prim::Single => Value::Single(digits.parse().ok()?),
        Prim::Double => Value::Double(digits.parse().ok()?),
        Prim::Decimal => Value::Decimal(parse_decimal(digits)?),
        Prim::Char => {
            let unit: u16 = digits.parse().ok()?;
            Value::Char(char::from_u32(u32::from(unit))?)
        }
        _ => return None,
    })
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.contains(['e', 'E']) {
        Decimal::from_scientific(text).ok()
    } else {
        Decimal::from_str(text).ok()
    }
}

/// Look up an enum value by name (case-insensitive).
pub(crate) fn parse_enum(text: &str, target: &Ty, def: &EnumDef) -> Option<Value> {
    let type_ref = target.as_named()?;
    let (name, value) = def.find(text)?;
    Some(Value::Enum {
        ty: type_ref,
        name: name.to_owned(),
        value,
    })
}

/// Predefined type names usable in expressions, matched case-insensitively.
pub fn prim_by_name(name: &str) -> Option<Prim> {
    const NAMES: &[(&str, Prim)] = &[
        ("Object", Prim::Object),
        ("Boolean", Prim::Bool),
        ("Char", Prim::Char),
        ("String", Prim::String),
        ("SByte", Prim::SByte),
        ("Byte", Prim::Byte),
        ("Int16", Prim::Int16),
        ("UInt16", Prim::UInt16),
        ("Int32", Prim::Int32),
        ("UInt32", Prim::UInt32),
        ("Int64", Prim::Int64),
        ("UInt64", Prim::UInt64),
        ("Single", Prim::Single),
        ("Double", Prim::Double),
        ("Decimal", Prim::Decimal),
        ("DateTime", Prim::DateTime),
        ("TimeSpan", Prim::TimeSpan),
        ("Guid", Prim::Guid),
        ("bool", Prim::Bool),
        ("short", Prim::Int16),
        ("ushort", Prim::UInt16),
        ("int", Prim::Int32),
        ("uint", Prim::UInt32),
        ("long", Prim::Int64),
        ("ulong", Prim::UInt64),
        ("float", Prim::Single),
    ];
    NAMES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, prim)| *prim)
}
