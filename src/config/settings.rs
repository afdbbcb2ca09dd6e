//! Resolver-wide settings.
//!
//! Settings are usually read from a `settings` table next to the resource types:
//!
//! ```toml
//! [resdeps]
//! warn_on_missing = true
//! use_link_header = true
//! link_header_prefix = "https://cdn.example.com"
//! prefix_mode = 0
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::header::PrefixMode;

/// Global defaults and header options for a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Default for types without their own `warn` flag
    pub warn_on_missing: bool,

    /// Default for types without their own `link` flag
    pub use_link_header: bool,

    /// Static prefix, or the name of a prefix callback in modes 1 and 2
    pub link_header_prefix: String,

    /// How `link_header_prefix` is interpreted
    pub prefix_mode: PrefixMode,

    /// Also emit preload headers for URL aliases
    pub link_urls: bool,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            warn_on_missing: true,
            use_link_header: false,
            link_header_prefix: String::new(),
            prefix_mode: PrefixMode::Static,
            link_urls: false,
        }
    }
}

impl ResolverSettings {
    /// Deserialize settings from a configuration tree.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::deserialize(value).context("Invalid resolver settings")
    }
}
