//! dynq IR - Intermediate Representation Types
//!
//! This crate contains the data structures shared by every stage of the
//! dynamic query expression compiler:
//! - Spans for source locations
//! - Tokens and `TokenList` for lexer output
//! - Static types (`Ty`) and constant values (`Value`)
//! - Member, method and indexer signatures handed out by the host
//! - The typed expression tree (`Expr`) consumed by query engines
//!
//! # Design Philosophy
//!
//! - **Typed Everywhere**: every `Expr` carries its resolved static type.
//! - **Owned Trees**: an `Expr` is a self-contained value. Nothing refers back
//!   into parser state, so a compiled tree can outlive the parse that built it.
//! - **Immutable After Construction**: rewriting means building a new node.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod expr;
mod member;
mod ops;
mod span;
mod token;
mod ty;
mod value;
pub mod visitor;

pub use expr::{AggregateOp, Expr, ExprKind, ParamRef, PendingLiteral, QueryOperator};
pub use member::{IndexerSig, MemberFlags, MemberKind, MemberSig, MethodSig, ParamSig};
pub use ops::{BinaryOp, UnaryOp};
pub use span::{Span, SpanError};
pub use token::{Token, TokenKind, TokenList};
pub use ty::{Prim, Ty, TypeRef};
pub use value::Value;
