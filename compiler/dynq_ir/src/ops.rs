//! Binary and unary operators of the IR.

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    /// String concatenation (`&`, or `+` with a string operand).
    Concat,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Short-circuit logical
    AndAlso,
    OrElse,

    /// Bitwise and; only produced by lowering the `has` operator.
    BitAnd,
}

impl BinaryOp {
    /// Symbol used when rendering the IR.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Concat => "++",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::AndAlso => "&&",
            Self::OrElse => "||",
            Self::BitAnd => "&",
        }
    }

    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq
        )
    }
}

/// Unary operators.
///
/// Conversions are unary nodes whose target type is the node's own type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    Negate,
    Not,
    /// Widening or reference conversion.
    Convert,
    /// Explicit numeric conversion that must fail on overflow.
    ConvertChecked,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Not => "!",
            Self::Convert => "Convert",
            Self::ConvertChecked => "ConvertChecked",
        }
    }

    pub const fn is_conversion(self) -> bool {
        matches!(self, Self::Convert | Self::ConvertChecked)
    }
}
