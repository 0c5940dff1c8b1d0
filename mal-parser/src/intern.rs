// mal-parser - Name interning shared by symbols and keywords
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! A process-wide name table.
//!
//! Symbols and keywords each own one [`NameTable`]. Interning a name twice
//! returns the same allocation, so equality and hashing on the interned
//! handle reduce to pointer operations. Entries are never removed.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

/// A lazily created, append-only set of interned names.
pub(crate) struct NameTable {
    names: OnceLock<Mutex<HashSet<Arc<str>>>>,
}

impl NameTable {
    pub(crate) const fn new() -> Self {
        NameTable {
            names: OnceLock::new(),
        }
    }

    /// Return the shared allocation for `name`, creating it on first use.
    pub(crate) fn intern(&self, name: &str) -> Arc<str> {
        let table = self.names.get_or_init(|| Mutex::new(HashSet::new()));
        // The set is only ever inserted into, so a poisoned lock still holds
        // a consistent table.
        let mut names = table.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = names.get(name) {
            return Arc::clone(existing);
        }
        let interned: Arc<str> = Arc::from(name);
        names.insert(Arc::clone(&interned));
        interned
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.names
            .get()
            .map(|t| t.lock().unwrap_or_else(PoisonError::into_inner).len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_shares_allocation() {
        static TABLE: NameTable = NameTable::new();
        let a = TABLE.intern("alpha");
        let b = TABLE.intern("alpha");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(TABLE.len(), 1);
    }

    #[test]
    fn different_names_are_distinct() {
        static TABLE: NameTable = NameTable::new();
        let a = TABLE.intern("alpha");
        let b = TABLE.intern("beta");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(TABLE.len(), 2);
    }
}
