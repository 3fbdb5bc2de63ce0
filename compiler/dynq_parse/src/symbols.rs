//! Named symbols visible to an expression.
//!
//! Lookups are ASCII case-insensitive. Insertion order is kept so that
//! diagnostics and dumps list symbols the way the caller declared them.

use dynq_ir::Expr;
use rustc_hash::FxHashMap;

#[derive(Default, Debug)]
pub(crate) struct SymbolTable {
    entries: Vec<(String, Expr)>,
    index: FxHashMap<String, usize>,
}

impl SymbolTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add `name`, returning `false` if it is already defined.
    pub(crate) fn insert(&mut self, name: &str, value: Expr) -> bool {
        let key = name.to_ascii_lowercase();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.entries.len());
        self.entries.push((name.to_owned(), value));
        true
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Expr> {
        let slot = *self.index.get(&name.to_ascii_lowercase())?;
        self.entries.get(slot).map(|(_, value)| value)
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}
