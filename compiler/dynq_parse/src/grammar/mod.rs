//! Grammar productions.
//!
//! - `expr/`: the expression precedence chain, primaries and postfix chains
//! - `ordering.rs`: comma-separated sort key lists

mod expr;
mod ordering;
