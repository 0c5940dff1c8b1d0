// mal-parser - Keyword type
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Keywords are self-evaluating names written with a leading colon.
//! They are interned in their own table, separate from symbols, so the
//! keyword `:foo` and the symbol `foo` never compare equal.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::intern::NameTable;

static KEYWORDS: NameTable = NameTable::new();

/// An interned keyword. The stored name excludes the leading `:`.
#[derive(Clone)]
pub struct Keyword {
    name: Arc<str>,
}

impl Keyword {
    pub fn new(name: &str) -> Self {
        Keyword {
            name: KEYWORDS.intern(name),
        }
    }

    /// The keyword's name without its colon.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.name)
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keyword(:{})", self.name)
    }
}

impl PartialEq for Keyword {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.name, &other.name)
    }
}

impl Eq for Keyword {}

impl Hash for Keyword {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.name) as *const u8, state);
    }
}

impl PartialOrd for Keyword {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Keyword {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}
