//! Parser for dynq expressions.
//!
//! Turns expression text into a typed `Expr` tree, resolving every name,
//! member, method and operator against a host-supplied `TypeIntrospect`.
//!
//! # Entry points
//!
//! - [`parse`]: a single expression, optionally required to have a type
//! - [`parse_lambda`]: the same, wrapped in a `Lambda` over the parameters
//! - [`parse_ordering`]: a comma-separated list of sort keys
//!
//! Each call lexes the whole input first, then runs a recursive-descent
//! parser that type-checks as it goes. The first error aborts the call.

mod cursor;
mod error;
mod grammar;
mod options;
mod parser;
mod stack;
mod symbols;

use dynq_ir::Expr;
use dynq_types::TypeIntrospect;

pub use error::{ParseError, ParseErrorKind};
pub use options::{MemberHook, ParseOptions};

pub(crate) use parser::Parser;

/// One key of an ordering clause.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderingKey {
    pub expr: Expr,
    pub ascending: bool,
}

/// Parse `text` as a single expression.
///
/// If `options` names a result type the expression is promoted to it.
#[tracing::instrument(level = "debug", skip_all, fields(text = text))]
pub fn parse(
    host: &dyn TypeIntrospect,
    text: &str,
    options: &ParseOptions<'_>,
) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(host, text, options)?;
    parser.parse_root()
}

/// Parse `text` as the body of a lambda over the declared parameters.
///
/// The result is a `Lambda` whose type is the full function type.
#[tracing::instrument(level = "debug", skip_all, fields(text = text))]
pub fn parse_lambda(
    host: &dyn TypeIntrospect,
    text: &str,
    options: &ParseOptions<'_>,
) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(host, text, options)?;
    let body = parser.parse_root()?;
    Ok(Expr::lambda(options.params().to_vec(), body))
}

/// Parse `text` as a list of sort keys, in order of priority.
///
/// Any result type in `options` is ignored.
#[tracing::instrument(level = "debug", skip_all, fields(text = text))]
pub fn parse_ordering(
    host: &dyn TypeIntrospect,
    text: &str,
    options: &ParseOptions<'_>,
) -> Result<Vec<OrderingKey>, ParseError> {
    let mut parser = Parser::new(host, text, options)?;
    parser.parse_ordering_keys()
}

#[cfg(test)]
mod tests;
