//! The typed expression tree.
//!
//! Every node carries its resolved static type. Trees are built bottom-up by
//! the parser and never mutated afterwards; rewriting a subtree means building
//! a new node around clones of its children.

mod display;

use crate::{BinaryOp, IndexerSig, MemberSig, MethodSig, Span, Ty, UnaryOp, Value};

/// A lambda or query parameter.
///
/// `id` distinguishes parameters that share a type and name, such as the
/// implicit element of an outer query and of a nested aggregate.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamRef {
    pub id: u32,
    pub name: Option<String>,
    pub ty: Ty,
}

/// Source text of a numeric or string literal whose final type is decided
/// at its use site.
///
/// `text` includes a folded leading minus sign.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingLiteral {
    pub text: String,
    pub span: Span,
}

/// Enumerable aggregate methods callable on sequence-typed members.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AggregateOp {
    Where,
    Any,
    All,
    Count,
    Min,
    Max,
    Sum,
    Average,
}

impl AggregateOp {
    pub const ALL: [AggregateOp; 8] = [
        AggregateOp::Where,
        AggregateOp::Any,
        AggregateOp::All,
        AggregateOp::Count,
        AggregateOp::Min,
        AggregateOp::Max,
        AggregateOp::Sum,
        AggregateOp::Average,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Where => "Where",
            Self::Any => "Any",
            Self::All => "All",
            Self::Count => "Count",
            Self::Min => "Min",
            Self::Max => "Max",
            Self::Sum => "Sum",
            Self::Average => "Average",
        }
    }

    /// Case-insensitive lookup by method name.
    pub fn from_name(name: &str) -> Option<AggregateOp> {
        Self::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(name))
    }
}

/// Query operators produced by the composer.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueryOperator {
    Where,
    OrderBy,
    OrderByDescending,
    ThenBy,
    ThenByDescending,
    Take,
    Skip,
    Any,
    Count,
}

impl QueryOperator {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Where => "Where",
            Self::OrderBy => "OrderBy",
            Self::OrderByDescending => "OrderByDescending",
            Self::ThenBy => "ThenBy",
            Self::ThenByDescending => "ThenByDescending",
            Self::Take => "Take",
            Self::Skip => "Skip",
            Self::Any => "Any",
            Self::Count => "Count",
        }
    }
}

/// An expression node.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Ty,
    pub span: Span,
}

/// Expression variants.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    /// A constant. Literals keep their source text in `pending` until a use
    /// site fixes their type.
    Constant {
        value: Value,
        pending: Option<PendingLiteral>,
    },
    Parameter(ParamRef),
    /// Field or property read. `instance` is `None` for static members.
    Member {
        instance: Option<Box<Expr>>,
        member: MemberSig,
    },
    /// Method call. `instance` is `None` for static methods.
    Call {
        instance: Option<Box<Expr>>,
        method: MethodSig,
        args: Vec<Expr>,
    },
    /// Constructor invocation.
    New { ctor: MethodSig, args: Vec<Expr> },
    /// Unary operator or conversion to `Expr::ty`.
    Unary { op: UnaryOp, operand: Box<Expr> },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Conditional {
        test: Box<Expr>,
        if_true: Box<Expr>,
        if_false: Box<Expr>,
    },
    /// Element access. `indexer` is `None` for array element access.
    Index {
        collection: Box<Expr>,
        indexer: Option<IndexerSig>,
        args: Vec<Expr>,
    },
    Lambda { params: Vec<ParamRef>, body: Box<Expr> },
    /// Enumerable aggregate over a sequence-typed expression. `args` holds
    /// the lambda argument, if any.
    Aggregate {
        source: Box<Expr>,
        element: Ty,
        op: AggregateOp,
        type_args: Vec<Ty>,
        args: Vec<Expr>,
    },
    /// Root queryable source handed in by the host.
    Source { name: String },
    /// Query operator applied to a queryable source.
    Query {
        source: Box<Expr>,
        op: QueryOperator,
        type_args: Vec<Ty>,
        args: Vec<Expr>,
    },
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, ty: Ty, span: Span) -> Self {
        Expr { kind, ty, span }
    }

    pub fn constant(value: Value, ty: Ty, span: Span) -> Self {
        Expr::new(
            ExprKind::Constant {
                value,
                pending: None,
            },
            ty,
            span,
        )
    }

    /// A literal whose type may still change at its use site.
    pub fn literal(value: Value, ty: Ty, text: impl Into<String>, span: Span) -> Self {
        Expr::new(
            ExprKind::Constant {
                value,
                pending: Some(PendingLiteral {
                    text: text.into(),
                    span,
                }),
            },
            ty,
            span,
        )
    }

    /// The untyped `null` literal (typed as `Object` until promoted).
    pub fn null_literal(span: Span) -> Self {
        Expr::constant(Value::Null, Ty::OBJECT, span)
    }

    pub fn parameter(param: ParamRef, span: Span) -> Self {
        let ty = param.ty.clone();
        Expr::new(ExprKind::Parameter(param), ty, span)
    }

    pub fn member(instance: Option<Expr>, member: MemberSig, span: Span) -> Self {
        let ty = member.ty.clone();
        Expr::new(
            ExprKind::Member {
                instance: instance.map(Box::new),
                member,
            },
            ty,
            span,
        )
    }

    pub fn call(instance: Option<Expr>, method: MethodSig, args: Vec<Expr>, span: Span) -> Self {
        let ty = method.ret.clone();
        Expr::new(
            ExprKind::Call {
                instance: instance.map(Box::new),
                method,
                args,
            },
            ty,
            span,
        )
    }

    pub fn new_object(ctor: MethodSig, args: Vec<Expr>, span: Span) -> Self {
        let ty = ctor.ret.clone();
        Expr::new(ExprKind::New { ctor, args }, ty, span)
    }

    pub fn unary(op: UnaryOp, operand: Expr, ty: Ty) -> Self {
        let span = operand.span;
        Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            ty,
            span,
        )
    }

    /// Conversion of `self` to `ty`.
    #[must_use]
    pub fn convert(self, ty: Ty) -> Self {
        Expr::unary(UnaryOp::Convert, self, ty)
    }

    /// Checked (overflow-trapping) conversion of `self` to `ty`.
    #[must_use]
    pub fn convert_checked(self, ty: Ty) -> Self {
        Expr::unary(UnaryOp::ConvertChecked, self, ty)
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr, ty: Ty) -> Self {
        let span = left.span.merge(right.span);
        Expr::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            ty,
            span,
        )
    }

    pub fn conditional(test: Expr, if_true: Expr, if_false: Expr) -> Self {
        let span = test.span.merge(if_false.span);
        let ty = if_true.ty.clone();
        Expr::new(
            ExprKind::Conditional {
                test: Box::new(test),
                if_true: Box::new(if_true),
                if_false: Box::new(if_false),
            },
            ty,
            span,
        )
    }

    /// A lambda whose type is the full function type.
    pub fn lambda(params: Vec<ParamRef>, body: Expr) -> Self {
        let span = body.span;
        let ty = Ty::func(
            params.iter().map(|p| p.ty.clone()).collect(),
            body.ty.clone(),
        );
        Expr::new(
            ExprKind::Lambda {
                params,
                body: Box::new(body),
            },
            ty,
            span,
        )
    }

    /// Is this the untyped `null` literal?
    pub fn is_null_literal(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Constant {
                value: Value::Null,
                ..
            }
        ) && self.ty == Ty::OBJECT
    }

    /// Source text of a literal that has not been retyped yet.
    pub fn pending_literal(&self) -> Option<&PendingLiteral> {
        match &self.kind {
            ExprKind::Constant { pending, .. } => pending.as_ref(),
            _ => None,
        }
    }

    pub fn as_constant(&self) -> Option<&Value> {
        match &self.kind {
            ExprKind::Constant { value, .. } => Some(value),
            _ => None,
        }
    }
}
