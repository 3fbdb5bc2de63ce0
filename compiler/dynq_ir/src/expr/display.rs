//! Compact textual rendering of expression trees.
//!
//! The output is meant for logs and test assertions, not for re-parsing.

use std::fmt;

use super::{Expr, ExprKind};
use crate::UnaryOp;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Constant { value, .. } => write!(f, "{value}"),
            ExprKind::Parameter(param) => match &param.name {
                Some(name) => f.write_str(name),
                None => write!(f, "${}", param.id),
            },
            ExprKind::Member { instance, member } => {
                match instance {
                    Some(instance) => write!(f, "{instance}")?,
                    None => write!(f, "{}", member.owner)?,
                }
                write!(f, ".{}", member.name)
            }
            ExprKind::Call {
                instance,
                method,
                args,
            } => {
                match instance {
                    Some(instance) => write!(f, "{instance}")?,
                    None => write!(f, "{}", method.owner)?,
                }
                write!(f, ".{}(", method.name)?;
                write_list(f, args)?;
                f.write_str(")")
            }
            ExprKind::New { ctor, args } => {
                write!(f, "new {}(", ctor.owner)?;
                write_list(f, args)?;
                f.write_str(")")
            }
            ExprKind::Unary { op, operand } => match op {
                UnaryOp::Negate | UnaryOp::Not => write!(f, "{}({operand})", op.as_symbol()),
                UnaryOp::Convert | UnaryOp::ConvertChecked => {
                    write!(f, "{}<{}>({operand})", op.as_symbol(), self.ty)
                }
            },
            ExprKind::Binary { op, left, right } => {
                write!(f, "({left} {} {right})", op.as_symbol())
            }
            ExprKind::Conditional {
                test,
                if_true,
                if_false,
            } => write!(f, "({test} ? {if_true} : {if_false})"),
            ExprKind::Index {
                collection, args, ..
            } => {
                write!(f, "{collection}[")?;
                write_list(f, args)?;
                f.write_str("]")
            }
            ExprKind::Lambda { params, body } => {
                f.write_str("(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match &param.name {
                        Some(name) => f.write_str(name)?,
                        None => write!(f, "${}", param.id)?,
                    }
                }
                write!(f, ") => {body}")
            }
            ExprKind::Aggregate {
                source, op, args, ..
            } => {
                write!(f, "{source}.{}(", op.name())?;
                write_list(f, args)?;
                f.write_str(")")
            }
            ExprKind::Source { name } => f.write_str(name),
            ExprKind::Query {
                source, op, args, ..
            } => {
                write!(f, "{source}.{}(", op.name())?;
                write_list(f, args)?;
                f.write_str(")")
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
