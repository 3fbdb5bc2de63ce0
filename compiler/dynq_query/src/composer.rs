//! Operators whose arguments are expression text.

use dynq_ir::{Expr, QueryOperator, Ty};
use dynq_parse::{parse_lambda, parse_ordering, MemberHook, ParseError, ParseOptions};
use dynq_types::TypeIntrospect;
use tracing::trace;

use crate::QuerySource;

/// Parses predicate and ordering text against a source's element type and
/// appends the matching query operators.
///
/// Substitution values and the member hook apply to every text the composer
/// parses.
pub struct Composer<'h> {
    host: &'h dyn TypeIntrospect,
    hook: Option<&'h dyn MemberHook>,
    values: Vec<Expr>,
}

impl<'h> Composer<'h> {
    pub fn new(host: &'h dyn TypeIntrospect) -> Self {
        Composer {
            host,
            hook: None,
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn hook(mut self, hook: &'h dyn MemberHook) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Supply the next positional substitution value (`@0`, `@1`, ...).
    #[must_use]
    pub fn value(mut self, value: Expr) -> Self {
        self.values.push(value);
        self
    }

    fn options(&self, element: &Ty) -> ParseOptions<'h> {
        let mut options = ParseOptions::new().implicit(element.clone());
        for value in &self.values {
            options = options.value(value.clone());
        }
        match self.hook {
            Some(hook) => options.hook(hook),
            None => options,
        }
    }

    /// `source.Where(it => predicate)`. The predicate must be `Boolean`.
    #[tracing::instrument(level = "debug", skip(self, source))]
    pub fn filter(&self, source: QuerySource, predicate: &str) -> Result<QuerySource, ParseError> {
        let options = self.options(source.element()).result_type(Ty::BOOL);
        let lambda = parse_lambda(self.host, predicate, &options)?;
        Ok(source.apply(QueryOperator::Where, Vec::new(), vec![lambda]))
    }

    /// `source.OrderBy(k1).ThenBy(k2)...`, one link per key, with the
    /// `Descending` forms for `desc` keys.
    #[tracing::instrument(level = "debug", skip(self, source))]
    pub fn order_by(&self, source: QuerySource, ordering: &str) -> Result<QuerySource, ParseError> {
        let options = self.options(source.element());
        let keys = parse_ordering(self.host, ordering, &options)?;
        let mut query = source;
        for (index, key) in keys.into_iter().enumerate() {
            let op = match (index, key.ascending) {
                (0, true) => QueryOperator::OrderBy,
                (0, false) => QueryOperator::OrderByDescending,
                (_, true) => QueryOperator::ThenBy,
                (_, false) => QueryOperator::ThenByDescending,
            };
            trace!(op = op.name(), key = %key.expr, "ordering key");
            let key_ty = key.expr.ty.clone();
            let lambda = Expr::lambda(options.params().to_vec(), key.expr);
            query = query.apply(op, vec![key_ty], vec![lambda]);
        }
        Ok(query)
    }
}
