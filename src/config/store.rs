//! Named configuration lookup.

use anyhow::Result;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use super::parser::parse_config_file;

/// Source of named configuration trees.
///
/// Names are dotted paths into the configuration, e.g. `site.resources` selects
/// the `resources` table inside the `site` table.
pub trait ConfigProvider {
    /// Look up a configuration tree by name.
    fn lookup(&self, name: &str) -> Option<Value>;
}

/// In-memory configuration tree with dotted-name lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigStore {
    root: Value,
}

impl ConfigStore {
    /// Wrap an already-parsed tree.
    pub fn new(root: Value) -> Self {
        Self {
            root,
        }
    }

    /// Load a configuration file (TOML, JSON or YAML, by extension).
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        Ok(Self::new(parse_config_file(path)?))
    }

    /// The whole tree.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Borrowing form of [`ConfigProvider::lookup`]. An empty name selects the root.
    pub fn get(&self, name: &str) -> Option<&Value> {
        if name.is_empty() {
            return Some(&self.root);
        }
        name.split('.').try_fold(&self.root, |node, segment| node.get(segment))
    }
}

impl ConfigProvider for ConfigStore {
    fn lookup(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}
