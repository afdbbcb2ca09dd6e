//! Arguments and helpers shared by the subcommands.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::config::{ConfigImporter, ConfigStore, ResourceConfig};
use crate::constants::DEFAULT_COMMENT_PREFIX;
use crate::core::ResError;

/// Output format for command results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON for scripts and tooling
    Json,
}

/// Where to read the resource configuration from.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Configuration file (TOML, JSON or YAML, chosen by extension)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: PathBuf,

    /// Dotted name of the resource table inside the file (default: the whole file)
    #[arg(long, value_name = "NAME")]
    pub section: Option<String>,

    /// Prefix that marks commented-out keys
    #[arg(long, value_name = "PREFIX", default_value = DEFAULT_COMMENT_PREFIX)]
    pub comment: String,
}

impl ConfigArgs {
    /// Load the file and import the selected resource table.
    pub fn load(&self) -> Result<(ConfigStore, ResourceConfig)> {
        let store = ConfigStore::from_file(&self.config)?;

        let mut config = ResourceConfig::new();
        let section = self.section.as_deref().unwrap_or("");
        ConfigImporter::new(&store)
            .load_resource_config(&mut config, section, None, &self.comment)
            .with_context(|| format!("Failed to load resources from {}", self.config.display()))?;

        Ok((store, config))
    }
}

/// Fail with [`ResError::UnknownResourceType`] unless `type_name` is defined.
pub fn ensure_type(config: &ResourceConfig, type_name: &str) -> Result<()> {
    if config.types.contains(type_name) {
        return Ok(());
    }
    Err(ResError::UnknownResourceType {
        name: type_name.to_string(),
        known: config.types.names(),
    }
    .into())
}
