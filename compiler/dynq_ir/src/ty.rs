//! Static types of IR nodes.
//!
//! Primitive types are closed and known to the compiler. Everything else the
//! host declares (records, enums, interfaces, static helper classes) is a
//! `Named` type identified by a `TypeRef` into the host's type registry.

use std::fmt;

/// Handle to a host-declared type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeRef(u32);

impl TypeRef {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TypeRef(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Primitive (built-in) types.
///
/// Names follow the runtime type names query hosts expose (`Int32`, not `int`),
/// since those are what users see in error messages.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Prim {
    Object,
    Bool,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Decimal,
    String,
    DateTime,
    TimeSpan,
    Guid,
    Void,
}

impl Prim {
    pub const ALL: [Prim; 19] = [
        Prim::Object,
        Prim::Bool,
        Prim::Char,
        Prim::SByte,
        Prim::Byte,
        Prim::Int16,
        Prim::UInt16,
        Prim::Int32,
        Prim::UInt32,
        Prim::Int64,
        Prim::UInt64,
        Prim::Single,
        Prim::Double,
        Prim::Decimal,
        Prim::String,
        Prim::DateTime,
        Prim::TimeSpan,
        Prim::Guid,
        Prim::Void,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Prim::Object => "Object",
            Prim::Bool => "Boolean",
            Prim::Char => "Char",
            Prim::SByte => "SByte",
            Prim::Byte => "Byte",
            Prim::Int16 => "Int16",
            Prim::UInt16 => "UInt16",
            Prim::Int32 => "Int32",
            Prim::UInt32 => "UInt32",
            Prim::Int64 => "Int64",
            Prim::UInt64 => "UInt64",
            Prim::Single => "Single",
            Prim::Double => "Double",
            Prim::Decimal => "Decimal",
            Prim::String => "String",
            Prim::DateTime => "DateTime",
            Prim::TimeSpan => "TimeSpan",
            Prim::Guid => "Guid",
            Prim::Void => "Void",
        }
    }

    /// Value types are the ones that have a nullable form.
    pub const fn is_value_type(self) -> bool {
        !matches!(self, Prim::Object | Prim::String | Prim::Void)
    }

    pub const fn is_signed_integral(self) -> bool {
        matches!(self, Prim::SByte | Prim::Int16 | Prim::Int32 | Prim::Int64)
    }

    pub const fn is_unsigned_integral(self) -> bool {
        matches!(self, Prim::Byte | Prim::UInt16 | Prim::UInt32 | Prim::UInt64)
    }

    pub const fn is_integral(self) -> bool {
        self.is_signed_integral() || self.is_unsigned_integral()
    }

    /// Integral, floating point and decimal types. `Char` is not numeric.
    pub const fn is_numeric(self) -> bool {
        self.is_integral() || matches!(self, Prim::Single | Prim::Double | Prim::Decimal)
    }
}

impl fmt::Display for Prim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The static type of an expression.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ty {
    Prim(Prim),
    /// A host-declared type.
    Named(TypeRef),
    /// Nullable form of a value type.
    Nullable(Box<Ty>),
    /// Single-dimension array.
    Array(Box<Ty>),
    /// Enumerable sequence of elements.
    Seq(Box<Ty>),
    /// Queryable source of elements (also enumerable).
    Queryable(Box<Ty>),
    /// Function type of a lambda: parameter types and result type.
    Func(Vec<Ty>, Box<Ty>),
}

impl Ty {
    pub const OBJECT: Ty = Ty::Prim(Prim::Object);
    pub const BOOL: Ty = Ty::Prim(Prim::Bool);
    pub const CHAR: Ty = Ty::Prim(Prim::Char);
    pub const SBYTE: Ty = Ty::Prim(Prim::SByte);
    pub const BYTE: Ty = Ty::Prim(Prim::Byte);
    pub const INT16: Ty = Ty::Prim(Prim::Int16);
    pub const UINT16: Ty = Ty::Prim(Prim::UInt16);
    pub const INT32: Ty = Ty::Prim(Prim::Int32);
    pub const UINT32: Ty = Ty::Prim(Prim::UInt32);
    pub const INT64: Ty = Ty::Prim(Prim::Int64);
    pub const UINT64: Ty = Ty::Prim(Prim::UInt64);
    pub const SINGLE: Ty = Ty::Prim(Prim::Single);
    pub const DOUBLE: Ty = Ty::Prim(Prim::Double);
    pub const DECIMAL: Ty = Ty::Prim(Prim::Decimal);
    pub const STRING: Ty = Ty::Prim(Prim::String);
    pub const DATE_TIME: Ty = Ty::Prim(Prim::DateTime);
    pub const TIME_SPAN: Ty = Ty::Prim(Prim::TimeSpan);
    pub const GUID: Ty = Ty::Prim(Prim::Guid);
    pub const VOID: Ty = Ty::Prim(Prim::Void);

    /// Wrap in the nullable form. Does not check that `self` is a value type.
    #[must_use]
    pub fn nullable(self) -> Ty {
        Ty::Nullable(Box::new(self))
    }

    #[must_use]
    pub fn seq(element: Ty) -> Ty {
        Ty::Seq(Box::new(element))
    }

    #[must_use]
    pub fn array(element: Ty) -> Ty {
        Ty::Array(Box::new(element))
    }

    #[must_use]
    pub fn queryable(element: Ty) -> Ty {
        Ty::Queryable(Box::new(element))
    }

    #[must_use]
    pub fn func(params: Vec<Ty>, result: Ty) -> Ty {
        Ty::Func(params, Box::new(result))
    }

    #[inline]
    pub fn is_nullable(&self) -> bool {
        matches!(self, Ty::Nullable(_))
    }

    /// Strip one level of nullability.
    pub fn non_nullable(&self) -> &Ty {
        match self {
            Ty::Nullable(inner) => inner,
            other => other,
        }
    }

    #[inline]
    pub fn as_prim(&self) -> Option<Prim> {
        match self {
            Ty::Prim(p) => Some(*p),
            _ => None,
        }
    }

    #[inline]
    pub fn as_named(&self) -> Option<TypeRef> {
        match self {
            Ty::Named(r) => Some(*r),
            _ => None,
        }
    }

    #[inline]
    pub fn is_prim(&self, prim: Prim) -> bool {
        *self == Ty::Prim(prim)
    }

    /// Result type of a `Func` type.
    pub fn func_result(&self) -> Option<&Ty> {
        match self {
            Ty::Func(_, result) => Some(result),
            _ => None,
        }
    }
}

impl From<Prim> for Ty {
    fn from(prim: Prim) -> Self {
        Ty::Prim(prim)
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Prim(p) => write!(f, "{p}"),
            Ty::Named(r) => write!(f, "type#{}", r.raw()),
            Ty::Nullable(inner) => write!(f, "{inner}?"),
            Ty::Array(inner) => write!(f, "{inner}[]"),
            Ty::Seq(inner) => write!(f, "IEnumerable<{inner}>"),
            Ty::Queryable(inner) => write!(f, "IQueryable<{inner}>"),
            Ty::Func(params, result) => {
                f.write_str("Func<")?;
                for param in params {
                    write!(f, "{param}, ")?;
                }
                write!(f, "{result}>")
            }
        }
    }
}
