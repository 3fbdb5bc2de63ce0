//! Queryable sources and the operators that need no parsing.

use dynq_ir::{Expr, ExprKind, QueryOperator, Span, Ty, Value};

/// A queryable expression together with its element type.
#[derive(Clone, Debug, PartialEq)]
pub struct QuerySource {
    expr: Expr,
    element: Ty,
}

impl QuerySource {
    /// A root source named `name` yielding elements of type `element`.
    pub fn new(name: impl Into<String>, element: Ty) -> Self {
        let expr = Expr::new(
            ExprKind::Source { name: name.into() },
            Ty::queryable(element.clone()),
            Span::DUMMY,
        );
        QuerySource { expr, element }
    }

    /// Wrap an existing queryable expression. `None` unless its type is
    /// `IQueryable<T>`.
    pub fn from_expr(expr: Expr) -> Option<Self> {
        let Ty::Queryable(element) = &expr.ty else {
            return None;
        };
        let element = (**element).clone();
        Some(QuerySource { expr, element })
    }

    pub fn element(&self) -> &Ty {
        &self.element
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn into_expr(self) -> Expr {
        self.expr
    }

    /// `source.Take(count)`
    #[must_use]
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn take(self, count: i32) -> Self {
        self.limit(QueryOperator::Take, count)
    }

    /// `source.Skip(count)`
    #[must_use]
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn skip(self, count: i32) -> Self {
        self.limit(QueryOperator::Skip, count)
    }

    fn limit(self, op: QueryOperator, count: i32) -> Self {
        let arg = Expr::constant(Value::Int32(count), Ty::INT32, Span::DUMMY);
        self.apply(op, Vec::new(), vec![arg])
    }

    /// `source.Any()`, a terminal `Boolean` expression.
    pub fn any(self) -> Expr {
        self.terminal(QueryOperator::Any, Ty::BOOL)
    }

    /// `source.Count()`, a terminal `Int32` expression.
    pub fn count(self) -> Expr {
        self.terminal(QueryOperator::Count, Ty::INT32)
    }

    fn terminal(self, op: QueryOperator, ty: Ty) -> Expr {
        let kind = ExprKind::Query {
            type_args: vec![self.element],
            source: Box::new(self.expr),
            op,
            args: Vec::new(),
        };
        Expr::new(kind, ty, Span::DUMMY)
    }

    /// Apply `op` with the element type followed by `extra_type_args`.
    /// The result stays a queryable of the same element type.
    pub(crate) fn apply(self, op: QueryOperator, extra_type_args: Vec<Ty>, args: Vec<Expr>) -> Self {
        let mut type_args = Vec::with_capacity(1 + extra_type_args.len());
        type_args.push(self.element.clone());
        type_args.extend(extra_type_args);
        let ty = self.expr.ty.clone();
        let kind = ExprKind::Query {
            source: Box::new(self.expr),
            op,
            type_args,
            args,
        };
        QuerySource {
            expr: Expr::new(kind, ty, Span::DUMMY),
            element: self.element,
        }
    }
}
