//! resdeps - declarative static resource dependency resolution
//!
//! Pages ask for resources by short name ("use js `app`"). resdeps turns those
//! requests into an ordered, de-duplicated list of concrete files and URLs per
//! output collection, and emits preload `Link` headers for them as a side
//! effect.
//!
//! # Architecture Overview
//!
//! - A **type registry** defines resource types (`js`, `css`, `font`, or any
//!   custom type) with search paths, extensions and behaviour flags
//! - **Extension tables** add per-type groups (named lists of other resources,
//!   possibly of other types, possibly blocked) and URL aliases
//! - A **resolver** owns the per-pass state: which `(type, name)` pairs have
//!   been decided, the output collections, and the emitted headers
//! - A **config importer** loads all of the above from nested configuration
//!
//! # Core Modules
//!
//! - [`core`] - error types, resource type definitions, group member references
//! - [`registry`] - the type registry, typed list edits, group and URL tables
//! - [`config`] - configuration files, named lookup, import, resolver settings
//! - [`resolver`] - resolution passes, path lookup, output, static group checks
//! - [`header`] - preload `Link` header formatting and prefix strategies
//! - [`cli`] - the `resdeps` command-line interface
//!
//! # Configuration Format
//!
//! ```toml
//! comment = "--"                    # keys starting with this are skipped
//!
//! [js]
//! path = ["/assets/js", "/vendor/js"]
//! exts = [".min.js", ".js"]
//! warn = true
//! link = false
//!
//! [js.groups]
//! app = ["jquery", "!legacy", "css:theme"]
//!
//! [js.urls]
//! cdn-lib = "https://example.com/lib.js"
//! ```
//!
//! Group members are `name`, `!name` (blocked), `type:name` (another type) or
//! `!type:name`. List properties also accept `{ "$splice" = [offset, count, ...] }`
//! and `{ "$push" = [...] }` edits.
//!
//! # Example
//!
//! ```rust,no_run
//! use resdeps::config::{ConfigImporter, ConfigStore, ResourceConfig};
//! use resdeps::resolver::Resolver;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let store = ConfigStore::from_file(Path::new("site.toml"))?;
//! let mut config = ResourceConfig::new();
//! ConfigImporter::new(&store).load_resource_config(&mut config, "resources", None, "--")?;
//!
//! let mut resolver = Resolver::new(&config);
//! resolver.add_js(&["app"])?;
//! resolver.add_css(&["theme"])?;
//!
//! let (data, headers) = resolver.finish();
//! println!("{}", serde_json::to_string_pretty(&data)?);
//! for (name, value) in headers.iter() {
//!     println!("{name}: {value}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod header;
pub mod registry;
pub mod resolver;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
