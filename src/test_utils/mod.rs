//! Test utilities for resdeps
//!
//! Helpers shared by unit and integration tests:
//! - [`init_test_logging`] - one-time tracing setup that plays well with `cargo test`
//! - [`AssetTree`] - asset files laid out under a temporary directory
//! - [`MemoryProbe`] - in-memory file existence probe that records what was probed
//! - [`fixtures`] - sample configurations
//!
//! # Example
//!
//! ```rust,no_run
//! use resdeps::config::ResourceConfig;
//! use resdeps::resolver::Resolver;
//! use resdeps::test_utils::{MemoryProbe, init_test_logging};
//!
//! init_test_logging(None);
//! let config = ResourceConfig::new();
//! let probe = MemoryProbe::with_files(["/js/app.js"]);
//! let mut resolver = Resolver::new(&config).with_probe(&probe);
//! resolver.use_resource("js", "app", false).unwrap();
//! ```

pub mod assets;
pub mod fixtures;

pub use assets::{AssetTree, MemoryProbe};
pub use fixtures::{SAMPLE_CONFIG_TOML, sample_config, sample_resource_config};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. The explicit `level` wins over
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=resdeps=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
