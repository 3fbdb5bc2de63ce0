//! Type system for dynq expressions.
//!
//! This crate answers every type question the parser asks:
//! - What members, methods, constructors and indexers does a type have?
//!   (`TypeIntrospect`, implemented by `TypeRegistry`)
//! - Is one type compatible with or assignable to another? (`TypeCx`)
//! - Can an expression be promoted to a target type, and what node does that
//!   produce? (`promote`, `explicit_conversion`)
//! - Which overload of a method, constructor, indexer or operator applies to
//!   a list of arguments? (`find_best`, `find_method`, `resolve_operator`)
//!
//! Nothing here reports errors. Lookups return `Option` or `Resolution` and
//! the parser turns failures into positioned diagnostics.

mod literal;
mod promote;
mod registry;
mod relations;
mod resolve;
mod signatures;

pub use literal::{guess_int_literal, guess_real_literal, prim_by_name};
pub use promote::{explicit_conversion, promote};
pub use registry::{EnumDef, TypeDef, TypeIntrospect, TypeKind, TypeRegistry};
pub use relations::TypeCx;
pub use resolve::{
    compare_conversions, find_best, find_constructor, find_indexer, find_method, Candidate,
    Resolution,
};
pub use signatures::{
    aggregate_result_type, resolve_aggregate, resolve_operator, OpSig, Operand, OperatorSet, Ret,
};
