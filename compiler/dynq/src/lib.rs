//! dynq compiles textual query expressions into typed expression trees.
//!
//! ```text
//! let mut registry = TypeRegistry::new();
//! let person = registry.declare("Person", TypeKind::Class);
//! registry.def_mut(person).property("Name", Ty::STRING).property("Age", Ty::INT32);
//!
//! let options = ParseOptions::new().implicit(Ty::Named(person)).result_type(Ty::BOOL);
//! let tree = dynq::parse(&registry, "Age >= 18 && Name.StartsWith(\"A\")", &options)?;
//! ```
//!
//! # Crates
//!
//! - [`ir`]: spans, tokens, types, values and the expression tree
//! - [`lexer`]: tokenizer
//! - [`types`]: host type introspection, promotion, overload resolution
//! - `dynq_parse`: the parser, re-exported at the top level
//! - `dynq_query`: `Where`/`OrderBy`/`Take`/`Skip` composition
//!
//! # Tracing
//!
//! Call [`init_tracing`] and set `RUST_LOG` (for example
//! `RUST_LOG=dynq_parse=debug,dynq_types=trace`) to see parse calls,
//! overload-resolution outcomes and literal re-typing.

use std::sync::Once;

pub use dynq_ir as ir;
pub use dynq_lexer as lexer;
pub use dynq_types as types;

pub use dynq_ir::{Expr, ExprKind, ParamRef, Span, Ty, Value};
pub use dynq_parse::{
    parse, parse_lambda, parse_ordering, MemberHook, OrderingKey, ParseError, ParseErrorKind,
    ParseOptions,
};
pub use dynq_query::{Composer, QuerySource};
pub use dynq_types::{EnumDef, TypeIntrospect, TypeKind, TypeRegistry};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing output.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
