//! Operator signature tables.
//!
//! Each operator category lists the operand type combinations it accepts.
//! Operators are resolved exactly like method overloads: the operands are
//! the arguments, the table rows are the candidates. Categories extend each
//! other (equality accepts everything relational does, which accepts
//! everything arithmetic does); the extending category's own rows are tried
//! first and the inherited rows only if none of those apply.

use dynq_ir::{AggregateOp, Expr, Prim, Ty};
use smallvec::SmallVec;

use crate::resolve::{find_best, Candidate, Resolution};
use crate::TypeCx;

/// A formal operand type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    Plain(Prim),
    /// The nullable form of a value type.
    Lifted(Prim),
}

impl Operand {
    pub fn ty(self) -> Ty {
        match self {
            Operand::Plain(prim) => Ty::Prim(prim),
            Operand::Lifted(prim) => Ty::Prim(prim).nullable(),
        }
    }
}

/// How a signature's result type is determined.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ret {
    /// The type of the first promoted operand.
    Argument,
    Fixed(Operand),
}

/// One row of an operator table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OpSig {
    pub params: &'static [Operand],
    pub ret: Ret,
}

impl OpSig {
    fn mentions(&self, prim: Prim) -> bool {
        self.params
            .iter()
            .any(|p| matches!(p, Operand::Plain(q) | Operand::Lifted(q) if *q == prim))
    }

    /// Result type given the promoted operands.
    pub fn result_type(&self, args: &[Expr]) -> Ty {
        match self.ret {
            Ret::Argument => args.first().map_or(Ty::VOID, |arg| arg.ty.clone()),
            Ret::Fixed(operand) => operand.ty(),
        }
    }
}

impl Candidate for OpSig {
    fn formals(&self) -> SmallVec<[Ty; 4]> {
        self.params.iter().map(|p| p.ty()).collect()
    }
}

/// Operator categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OperatorSet {
    /// `&&`, `||`
    Logical,
    /// `*`, `/`, `%`
    Arithmetic,
    /// `<`, `<=`, `>`, `>=`
    Relational,
    /// `==`, `!=`
    Equality,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// Unary `-`
    Negation,
    /// Unary `!`
    Not,
}

impl OperatorSet {
    /// Rows of this category followed by the rows it inherits, one slice per
    /// level.
    pub fn levels(self) -> &'static [&'static [OpSig]] {
        match self {
            OperatorSet::Logical => &[LOGICAL],
            OperatorSet::Arithmetic => &[ARITHMETIC],
            OperatorSet::Relational => &[RELATIONAL, ARITHMETIC],
            OperatorSet::Equality => &[EQUALITY, RELATIONAL, ARITHMETIC],
            OperatorSet::Add => &[ADD, ARITHMETIC],
            OperatorSet::Subtract => &[SUBTRACT, ADD, ARITHMETIC],
            OperatorSet::Negation => &[NEGATION],
            OperatorSet::Not => &[NOT],
        }
    }
}

/// Resolve an operator against its table, level by level.
///
/// Rows over `Char` are only considered when an operand is already a
/// character; integer literals would otherwise narrow into them.
pub fn resolve_operator(cx: TypeCx<'_>, set: OperatorSet, args: &[Expr]) -> Resolution<OpSig> {
    let has_char = args.iter().any(|arg| *arg.ty.non_nullable() == Ty::CHAR);
    for level in set.levels() {
        let candidates = level
            .iter()
            .copied()
            .filter(|sig| has_char || !sig.mentions(Prim::Char));
        let resolution = find_best(cx, candidates, args);
        if !resolution.is_not_found() {
            return resolution;
        }
    }
    Resolution::NotFound
}

/// Resolve an enumerable aggregate. `args` is empty or holds the body of the
/// aggregate's lambda.
pub fn resolve_aggregate(cx: TypeCx<'_>, op: AggregateOp, args: &[Expr]) -> Resolution<OpSig> {
    let candidates = ENUMERABLE
        .iter()
        .filter(|(name, _)| *name == op)
        .map(|(_, sig)| *sig);
    find_best(cx, candidates, args)
}

/// Static type of an aggregate call over elements of type `element`.
pub fn aggregate_result_type(op: AggregateOp, element: &Ty, sig: &OpSig, args: &[Expr]) -> Ty {
    match op {
        AggregateOp::Where => Ty::seq(element.clone()),
        _ => sig.result_type(args),
    }
}

const BOOL: Operand = Operand::Plain(Prim::Bool);
const BOOL_N: Operand = Operand::Lifted(Prim::Bool);
const CHAR: Operand = Operand::Plain(Prim::Char);
const CHAR_N: Operand = Operand::Lifted(Prim::Char);
const INT: Operand = Operand::Plain(Prim::Int32);
const INT_N: Operand = Operand::Lifted(Prim::Int32);
const UINT: Operand = Operand::Plain(Prim::UInt32);
const UINT_N: Operand = Operand::Lifted(Prim::UInt32);
const LONG: Operand = Operand::Plain(Prim::Int64);
const LONG_N: Operand = Operand::Lifted(Prim::Int64);
const ULONG: Operand = Operand::Plain(Prim::UInt64);
const ULONG_N: Operand = Operand::Lifted(Prim::UInt64);
const FLOAT: Operand = Operand::Plain(Prim::Single);
const FLOAT_N: Operand = Operand::Lifted(Prim::Single);
const DOUBLE: Operand = Operand::Plain(Prim::Double);
const DOUBLE_N: Operand = Operand::Lifted(Prim::Double);
const DECIMAL: Operand = Operand::Plain(Prim::Decimal);
const DECIMAL_N: Operand = Operand::Lifted(Prim::Decimal);
const STRING: Operand = Operand::Plain(Prim::String);
const OBJECT: Operand = Operand::Plain(Prim::Object);
const DATE_TIME: Operand = Operand::Plain(Prim::DateTime);
const DATE_TIME_N: Operand = Operand::Lifted(Prim::DateTime);
const TIME_SPAN: Operand = Operand::Plain(Prim::TimeSpan);
const TIME_SPAN_N: Operand = Operand::Lifted(Prim::TimeSpan);
const GUID: Operand = Operand::Plain(Prim::Guid);
const GUID_N: Operand = Operand::Lifted(Prim::Guid);

macro_rules! sig {
    ($($param:expr),* => $ret:expr) => {
        OpSig { params: &[$($param),*], ret: $ret }
    };
    ($($param:expr),*) => {
        OpSig { params: &[$($param),*], ret: Ret::Argument }
    };
}

const LOGICAL: &[OpSig] = &[sig!(BOOL, BOOL), sig!(BOOL_N, BOOL_N)];

const ARITHMETIC: &[OpSig] = &[
    sig!(INT, INT),
    sig!(UINT, UINT),
    sig!(LONG, LONG),
    sig!(ULONG, ULONG),
    sig!(FLOAT, FLOAT),
    sig!(DOUBLE, DOUBLE),
    sig!(DECIMAL, DECIMAL),
    sig!(INT_N, INT_N),
    sig!(UINT_N, UINT_N),
    sig!(LONG_N, LONG_N),
    sig!(ULONG_N, ULONG_N),
    sig!(FLOAT_N, FLOAT_N),
    sig!(DOUBLE_N, DOUBLE_N),
    sig!(DECIMAL_N, DECIMAL_N),
];

const RELATIONAL: &[OpSig] = &[
    sig!(STRING, STRING => Ret::Fixed(BOOL)),
    sig!(CHAR, CHAR => Ret::Fixed(BOOL)),
    sig!(DATE_TIME, DATE_TIME => Ret::Fixed(BOOL)),
    sig!(TIME_SPAN, TIME_SPAN => Ret::Fixed(BOOL)),
    sig!(CHAR_N, CHAR_N => Ret::Fixed(BOOL)),
    sig!(DATE_TIME_N, DATE_TIME_N => Ret::Fixed(BOOL)),
    sig!(TIME_SPAN_N, TIME_SPAN_N => Ret::Fixed(BOOL)),
];

const EQUALITY: &[OpSig] = &[
    sig!(BOOL, BOOL => Ret::Fixed(BOOL)),
    sig!(BOOL_N, BOOL_N => Ret::Fixed(BOOL)),
    sig!(GUID, GUID => Ret::Fixed(BOOL)),
    sig!(GUID_N, GUID_N => Ret::Fixed(BOOL)),
];

const ADD: &[OpSig] = &[
    sig!(DATE_TIME, TIME_SPAN),
    sig!(TIME_SPAN, TIME_SPAN),
    sig!(DATE_TIME_N, TIME_SPAN_N),
    sig!(TIME_SPAN_N, TIME_SPAN_N),
];

const SUBTRACT: &[OpSig] = &[
    sig!(DATE_TIME, DATE_TIME => Ret::Fixed(TIME_SPAN)),
    sig!(DATE_TIME_N, DATE_TIME_N => Ret::Fixed(TIME_SPAN_N)),
];

const NEGATION: &[OpSig] = &[
    sig!(INT),
    sig!(LONG),
    sig!(FLOAT),
    sig!(DOUBLE),
    sig!(DECIMAL),
    sig!(INT_N),
    sig!(LONG_N),
    sig!(FLOAT_N),
    sig!(DOUBLE_N),
    sig!(DECIMAL_N),
];

const NOT: &[OpSig] = &[sig!(BOOL), sig!(BOOL_N)];

const ENUMERABLE: &[(AggregateOp, OpSig)] = &[
    (AggregateOp::Where, sig!(BOOL)),
    (AggregateOp::Any, sig!( => Ret::Fixed(BOOL))),
    (AggregateOp::Any, sig!(BOOL => Ret::Fixed(BOOL))),
    (AggregateOp::All, sig!(BOOL => Ret::Fixed(BOOL))),
    (AggregateOp::Count, sig!( => Ret::Fixed(INT))),
    (AggregateOp::Count, sig!(BOOL => Ret::Fixed(INT))),
    (AggregateOp::Min, sig!(OBJECT)),
    (AggregateOp::Max, sig!(OBJECT)),
    (AggregateOp::Sum, sig!(INT)),
    (AggregateOp::Sum, sig!(INT_N)),
    (AggregateOp::Sum, sig!(LONG)),
    (AggregateOp::Sum, sig!(LONG_N)),
    (AggregateOp::Sum, sig!(FLOAT)),
    (AggregateOp::Sum, sig!(FLOAT_N)),
    (AggregateOp::Sum, sig!(DOUBLE)),
    (AggregateOp::Sum, sig!(DOUBLE_N)),
    (AggregateOp::Sum, sig!(DECIMAL)),
    (AggregateOp::Sum, sig!(DECIMAL_N)),
    (AggregateOp::Average, sig!(INT => Ret::Fixed(DOUBLE))),
    (AggregateOp::Average, sig!(INT_N => Ret::Fixed(DOUBLE_N))),
    (AggregateOp::Average, sig!(LONG => Ret::Fixed(DOUBLE))),
    (AggregateOp::Average, sig!(LONG_N => Ret::Fixed(DOUBLE_N))),
    (AggregateOp::Average, sig!(FLOAT => Ret::Fixed(FLOAT))),
    (AggregateOp::Average, sig!(FLOAT_N => Ret::Fixed(FLOAT_N))),
    (AggregateOp::Average, sig!(DOUBLE => Ret::Fixed(DOUBLE))),
    (AggregateOp::Average, sig!(DOUBLE_N => Ret::Fixed(DOUBLE_N))),
    (AggregateOp::Average, sig!(DECIMAL => Ret::Fixed(DECIMAL))),
    (AggregateOp::Average, sig!(DECIMAL_N => Ret::Fixed(DECIMAL_N))),
];
