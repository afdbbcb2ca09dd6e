//! Per-request record of what has already been decided.

use std::collections::HashMap;

/// Final decision recorded for a `(type, name)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded {
    /// Blocked before it could be included
    Blocked,
    /// Resolved to a file
    File(String),
    /// Resolved to a URL alias
    Url(String),
    /// A group whose members have been processed
    Group,
}

impl Loaded {
    /// Whether the entry contributed output.
    #[must_use]
    pub fn is_included(&self) -> bool {
        matches!(self, Self::File(_) | Self::Url(_))
    }
}

/// Map of `type → name → decision`.
///
/// An entry, once written, is never overwritten during the same pass. Only
/// [`clear_type`](Self::clear_type) removes entries.
#[derive(Debug, Clone, Default)]
pub struct LoadedCache {
    entries: HashMap<String, HashMap<String, Loaded>>,
}

impl LoadedCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `(type, name)` has been decided.
    pub fn contains(&self, type_name: &str, name: &str) -> bool {
        self.get(type_name, name).is_some()
    }

    /// Look up the decision for `(type, name)`.
    pub fn get(&self, type_name: &str, name: &str) -> Option<&Loaded> {
        self.entries.get(type_name)?.get(name)
    }

    /// Record a decision. An existing decision is kept.
    pub fn insert(&mut self, type_name: &str, name: &str, loaded: Loaded) {
        self.entries
            .entry(type_name.to_string())
            .or_default()
            .entry(name.to_string())
            .or_insert(loaded);
    }

    /// Forget every decision for one type.
    pub fn clear_type(&mut self, type_name: &str) {
        self.entries.remove(type_name);
    }

    /// Number of decisions recorded for one type.
    pub fn len_of(&self, type_name: &str) -> usize {
        self.entries.get(type_name).map_or(0, HashMap::len)
    }

    /// Whether nothing has been decided.
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(HashMap::is_empty)
    }
}
