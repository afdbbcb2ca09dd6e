//! Render data produced by a resolution pass.
//!
//! Every resolved resource is appended to the collection named by its type's
//! `name` property. File paths are stored as plain strings and URL aliases as
//! `{ "url": ... }` objects, which keeps the JSON form identical to what page
//! templates expect:
//!
//! ```json
//! {
//!   "scripts": ["assets/js/app.min.js", { "url": "https://cdn.example.com/jquery.js" }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of an output collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputEntry {
    /// A resolved file path
    File(String),
    /// A URL alias
    Url {
        /// The literal URL
        url: String,
    },
}

impl OutputEntry {
    /// Build a URL entry.
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url {
            url: url.into(),
        }
    }

    /// The path or URL of this entry.
    pub fn target(&self) -> &str {
        match self {
            Self::File(path) => path,
            Self::Url {
                url,
            } => url,
        }
    }
}

/// Named output collections, in append order within each collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderData {
    collections: BTreeMap<String, Vec<OutputEntry>>,
}

impl RenderData {
    /// Create empty render data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to a collection, creating the collection if needed.
    pub fn append(&mut self, collection: &str, entry: OutputEntry) {
        self.collections.entry(collection.to_string()).or_default().push(entry);
    }

    /// Entries of one collection; empty when the collection does not exist.
    pub fn collection(&self, name: &str) -> &[OutputEntry] {
        self.collections.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Remove a collection and return its entries.
    pub fn remove(&mut self, name: &str) -> Option<Vec<OutputEntry>> {
        self.collections.remove(name)
    }

    /// Collections in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[OutputEntry])> {
        self.collections.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Whether no collection has been written.
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}
