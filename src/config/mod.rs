//! Configuration loading for resdeps.
//!
//! - [`ConfigStore`] / [`ConfigProvider`] - named configuration trees loaded from
//!   TOML, JSON or YAML files
//! - [`ConfigImporter`] - applies a configuration tree to a [`ResourceConfig`]
//! - [`ResolverSettings`] - global defaults and header options
//!
//! A [`ResourceConfig`] is the read-only input of a resolution pass: the type
//! registry, the group and URL tables, and the settings.
//!
//! ```rust
//! use resdeps::config::{ConfigImporter, ConfigStore, ResourceConfig};
//! use serde_json::json;
//!
//! # fn example() -> anyhow::Result<()> {
//! let store = ConfigStore::new(json!({
//!     "assets": {
//!         "js": { "path": ["/static/js"], "groups": { "app": ["jquery", "main"] } }
//!     }
//! }));
//!
//! let mut config = ResourceConfig::new();
//! ConfigImporter::new(&store).load_resource_config(&mut config, "assets", None, "--")?;
//! assert_eq!(config.tables.group("js", "app").map(<[_]>::len), Some(2));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod importer;
pub mod parser;
pub mod settings;
pub mod store;

pub use importer::{ConfigImporter, ConfigSource};
pub use parser::{ConfigFormat, parse_config_file};
pub use settings::ResolverSettings;
pub use store::{ConfigProvider, ConfigStore};

use crate::registry::{ExtensionTables, TypeRegistry};

/// Everything a resolution pass reads.
#[derive(Debug, Clone, Default)]
pub struct ResourceConfig {
    /// Type definitions
    pub types: TypeRegistry,
    /// Group and URL definitions
    pub tables: ExtensionTables,
    /// Global defaults and header options
    pub settings: ResolverSettings,
}

impl ResourceConfig {
    /// Create a configuration with the built-in types and default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the settings.
    #[must_use]
    pub fn with_settings(mut self, settings: ResolverSettings) -> Self {
        self.settings = settings;
        self
    }
}
