//! Constant values carried by `Constant` IR nodes.

use std::fmt;

use rust_decimal::Decimal;

use crate::{Prim, TypeRef};

/// A constant value.
///
/// The variant mirrors the primitive type the value was typed as; the IR node
/// that holds it carries the full static type (which may be the nullable form).
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Single(f32),
    Double(f64),
    Decimal(Decimal),
    String(String),
    /// A named enumeration member. `value` holds the raw bits of the
    /// underlying integral value.
    Enum {
        ty: TypeRef,
        name: String,
        value: i64,
    },
}

impl Value {
    /// The primitive type this value naturally has (`None` for null and enums).
    pub fn prim(&self) -> Option<Prim> {
        Some(match self {
            Value::Null | Value::Enum { .. } => return None,
            Value::Bool(_) => Prim::Bool,
            Value::Char(_) => Prim::Char,
            Value::SByte(_) => Prim::SByte,
            Value::Byte(_) => Prim::Byte,
            Value::Int16(_) => Prim::Int16,
            Value::UInt16(_) => Prim::UInt16,
            Value::Int32(_) => Prim::Int32,
            Value::UInt32(_) => Prim::UInt32,
            Value::Int64(_) => Prim::Int64,
            Value::UInt64(_) => Prim::UInt64,
            Value::Single(_) => Prim::Single,
            Value::Double(_) => Prim::Double,
            Value::Decimal(_) => Prim::Decimal,
            Value::String(_) => Prim::String,
        })
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Build an integral value of type `prim` from raw enum bits.
    ///
    /// Returns `None` if `prim` is not integral or the value does not fit.
    pub fn integral(prim: Prim, raw: i64) -> Option<Value> {
        Some(match prim {
            Prim::SByte => Value::SByte(i8::try_from(raw).ok()?),
            Prim::Byte => Value::Byte(u8::try_from(raw).ok()?),
            Prim::Int16 => Value::Int16(i16::try_from(raw).ok()?),
            Prim::UInt16 => Value::UInt16(u16::try_from(raw).ok()?),
            Prim::Int32 => Value::Int32(i32::try_from(raw).ok()?),
            Prim::UInt32 => Value::UInt32(u32::try_from(raw).ok()?),
            Prim::Int64 => Value::Int64(raw),
            Prim::UInt64 => Value::UInt64(u64::from_ne_bytes(raw.to_ne_bytes())),
            _ => return None,
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "'{c}'"),
            Value::SByte(v) => write!(f, "{v}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Int16(v) => write!(f, "{v}"),
            Value::UInt16(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::UInt32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::UInt64(v) => write!(f, "{v}"),
            Value::Single(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Enum { name, .. } => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests;
