//! Expression tree visitor.
//!
//! Default implementations call `walk_expr`, which visits children in
//! source order. Override `visit_expr` to act on specific nodes and call
//! `walk_expr` to keep descending.
//!
//! # Example
//!
//! ```text
//! struct CountConstants {
//!     count: usize,
//! }
//!
//! impl<'e> Visitor<'e> for CountConstants {
//!     fn visit_expr(&mut self, expr: &'e Expr) {
//!         if let ExprKind::Constant { .. } = expr.kind {
//!             self.count += 1;
//!         }
//!         walk_expr(self, expr);
//!     }
//! }
//! ```

use crate::{Expr, ExprKind, ParamRef};

/// Expression visitor.
///
/// The visitor can mutate its own state; the tree stays immutable.
pub trait Visitor<'e> {
    /// Visit an expression.
    fn visit_expr(&mut self, expr: &'e Expr) {
        walk_expr(self, expr);
    }

    /// Visit a parameter reference or lambda parameter declaration.
    fn visit_param(&mut self, param: &'e ParamRef) {
        let _ = param;
    }
}

/// Visit every child of `expr`.
pub fn walk_expr<'e, V: Visitor<'e> + ?Sized>(visitor: &mut V, expr: &'e Expr) {
    match &expr.kind {
        ExprKind::Constant { .. } | ExprKind::Source { .. } => {}
        ExprKind::Parameter(param) => visitor.visit_param(param),
        ExprKind::Member { instance, .. } => {
            if let Some(instance) = instance {
                visitor.visit_expr(instance);
            }
        }
        ExprKind::Call { instance, args, .. } => {
            if let Some(instance) = instance {
                visitor.visit_expr(instance);
            }
            walk_list(visitor, args);
        }
        ExprKind::New { args, .. } => walk_list(visitor, args),
        ExprKind::Unary { operand, .. } => visitor.visit_expr(operand),
        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        ExprKind::Conditional {
            test,
            if_true,
            if_false,
        } => {
            visitor.visit_expr(test);
            visitor.visit_expr(if_true);
            visitor.visit_expr(if_false);
        }
        ExprKind::Index {
            collection, args, ..
        } => {
            visitor.visit_expr(collection);
            walk_list(visitor, args);
        }
        ExprKind::Lambda { params, body } => {
            for param in params {
                visitor.visit_param(param);
            }
            visitor.visit_expr(body);
        }
        ExprKind::Aggregate { source, args, .. } | ExprKind::Query { source, args, .. } => {
            visitor.visit_expr(source);
            walk_list(visitor, args);
        }
    }
}

fn walk_list<'e, V: Visitor<'e> + ?Sized>(visitor: &mut V, exprs: &'e [Expr]) {
    for expr in exprs {
        visitor.visit_expr(expr);
    }
}
