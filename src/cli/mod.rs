//! Command-line interface for resdeps.
//!
//! The binary loads a resource configuration file and runs the engine against
//! the real filesystem:
//!
//! - `resolve` - resolve names of one type, print collections and preload headers
//! - `types` - print the effective type definitions, groups and URL aliases
//! - `check` - report cyclic groups and members of undefined types
//!
//! ```bash
//! resdeps resolve -c site.toml --section resources --settings settings js app
//! resdeps types -c resources.json --format json
//! resdeps -v check -c resources.yaml
//! ```
//!
//! Logging goes to stderr through `tracing`. The filter is `debug` with
//! `--verbose`, `error` with `--quiet`, and otherwise `RUST_LOG` or `warn`.

mod check;
pub mod common;
mod resolve;
mod types;


pub use check::CheckCommand;
pub use common::{ConfigArgs, OutputFormat};
pub use resolve::ResolveCommand;
pub use types::TypesCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Runtime configuration derived from the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter override; `None` defers to `RUST_LOG`, then `warn`
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Create a configuration with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The log filter this configuration selects.
    pub fn env_filter(&self) -> EnvFilter {
        match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        }
    }

    /// Install the stderr `tracing` subscriber. Later calls are ignored.
    pub fn init_logging(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Resolve static resource dependencies from declarative configuration.
#[derive(Parser, Debug)]
#[command(
    name = "resdeps",
    about = "Resolve static resource dependencies from declarative configuration",
    version,
    long_about = "resdeps resolves scripts, stylesheets, fonts and custom asset types \
                  against configured search paths, expands groups, and prints the \
                  resulting collections and preload Link headers."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve resources of one type and print the result
    Resolve(ResolveCommand),

    /// Show the effective resource type definitions
    Types(TypesCommand),

    /// Check group definitions for cycles and unknown types
    Check(CheckCommand),
}

impl Cli {
    /// Build the runtime configuration from the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
        }
    }

    /// Install logging and run the selected subcommand.
    pub fn execute(self) -> Result<()> {
        self.build_config().init_logging();

        match self.command {
            Commands::Resolve(cmd) => cmd.execute(),
            Commands::Types(cmd) => cmd.execute(),
            Commands::Check(cmd) => cmd.execute(),
        }
    }
}
