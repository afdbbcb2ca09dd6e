//! Configuration file parsing.
//!
//! Resource configuration is plain data: a tree of mappings, lists and scalars.
//! Files are parsed into a [`serde_json::Value`] tree regardless of their format,
//! so the importer only ever deals with one representation. The format is chosen
//! from the file extension:
//!
//! | Extension         | Format |
//! |-------------------|--------|
//! | `.json`           | JSON   |
//! | `.yaml`, `.yml`   | YAML   |
//! | anything else     | TOML   |
//!
//! ```rust,no_run
//! use resdeps::config::parse_config_file;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let tree = parse_config_file(Path::new("resources.toml"))?;
//! println!("{}", tree["js"]["path"]);
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use crate::core::ResError;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML
    Toml,
    /// JSON
    Json,
    /// YAML
    Yaml,
}

impl ConfigFormat {
    /// Pick a format from a file extension. Unknown extensions are TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Self::Json,
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Toml,
        }
    }

    /// Parse `content` in this format.
    pub fn parse(self, content: &str) -> Result<Value, String> {
        match self {
            Self::Toml => toml::from_str::<Value>(content).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str::<Value>(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str::<Value>(content).map_err(|e| e.to_string()),
        }
    }
}

/// Read and parse a configuration file into a value tree.
///
/// # Errors
///
/// - the file cannot be read ([`ResError::IoError`])
/// - the content is not valid for the detected format ([`ResError::ConfigParseError`])
pub fn parse_config_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .map_err(ResError::from)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    ConfigFormat::from_path(path).parse(&content).map_err(|reason| {
        anyhow::Error::from(ResError::ConfigParseError {
            file: path.display().to_string(),
            reason,
        })
    })
}
