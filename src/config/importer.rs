//! Bulk import of resource configuration.
//!
//! A configuration is a mapping of type name to type section:
//!
//! ```toml
//! comment = "#"           # optional: override the comment prefix
//!
//! [js]
//! path = ["/assets/js", "/vendor/js"]
//! link = true
//! "#path" = ["/old"]      # commented out, skipped
//!
//! [js.groups]
//! app = ["jquery", "!legacy", "css:theme"]
//!
//! [js.urls]
//! jquery = "https://cdn.example.com/jquery.min.js"
//!
//! [img]                   # unknown types are created
//! exts = [".webp", ".png"]
//! path = { "$splice" = [0, 0, "/img"] }
//! ```
//!
//! Within a type section:
//! - `groups` and `urls` mappings are merged by key into the extension tables
//! - `pathOffset` / `pathReplace` turn the section's `path` into an
//!   [`add_resource_paths`](crate::registry::TypeRegistry::add_resource_paths) call
//! - everything else goes through
//!   [`set_type_property`](crate::registry::TypeRegistry::set_type_property)

use anyhow::Result;
use serde_json::{Map, Value};
use tracing::{debug, error};

use super::ResourceConfig;
use super::store::ConfigProvider;
use crate::constants::{COMMENT_KEY, PATH_OFFSET_FIELD, PATH_REPLACE_FIELD};
use crate::core::ResError;
use crate::registry::tables::is_comment;
use crate::registry::{ExtensionField, ListOp};

/// Where an import reads its configuration from.
#[derive(Debug, Clone, Copy)]
pub enum ConfigSource<'v> {
    /// An already-built tree
    Inline(&'v Value),
    /// A name resolved through the importer's [`ConfigProvider`]
    Named(&'v str),
}

impl<'v> From<&'v Value> for ConfigSource<'v> {
    fn from(value: &'v Value) -> Self {
        Self::Inline(value)
    }
}

impl<'v> From<&'v str> for ConfigSource<'v> {
    fn from(name: &'v str) -> Self {
        Self::Named(name)
    }
}

/// Applies configuration trees to a [`ResourceConfig`].
pub struct ConfigImporter<'p> {
    provider: Option<&'p dyn ConfigProvider>,
}

impl<'p> ConfigImporter<'p> {
    /// Create an importer that resolves named sources through `provider`.
    pub fn new(provider: &'p dyn ConfigProvider) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Create an importer that only accepts inline sources.
    pub fn inline_only() -> Self {
        Self {
            provider: None,
        }
    }

    /// Import a configuration into `target`.
    ///
    /// With `type_name`, the source is one type's section, or a whole
    /// configuration from which that type's section is taken when present.
    /// Without it, every mapping-valued top-level key is imported as a type
    /// section.
    ///
    /// # Errors
    ///
    /// [`ResError::ConfigError`] when a named source is unknown, when there is
    /// no provider to resolve it, or when the source is not a mapping. Problems
    /// inside the mapping are logged and skipped.
    pub fn load_resource_config<'v>(
        &self,
        target: &mut ResourceConfig,
        source: impl Into<ConfigSource<'v>>,
        type_name: Option<&str>,
        comment: &str,
    ) -> Result<()> {
        let owned;
        let config = match source.into() {
            ConfigSource::Inline(value) => value,
            ConfigSource::Named(name) => {
                let provider = self.provider.ok_or_else(|| ResError::ConfigError {
                    message: format!("Cannot resolve config '{name}' without a config provider"),
                })?;
                owned = provider.lookup(name).ok_or_else(|| ResError::ConfigError {
                    message: format!("Invalid config '{name}'"),
                })?;
                &owned
            }
        };

        let Some(map) = config.as_object() else {
            return Err(ResError::ConfigError {
                message: format!("Resource configuration must be a mapping, found {}", kind(config)),
            }
            .into());
        };

        let comment = map.get(COMMENT_KEY).and_then(Value::as_str).unwrap_or(comment);

        if let Some(type_name) = type_name {
            let section = map.get(type_name).and_then(Value::as_object).unwrap_or(map);
            update_type_section(target, type_name, section, comment);
            return Ok(());
        }

        for (key, section) in map {
            if key == COMMENT_KEY || is_comment(key, comment) {
                continue;
            }
            match section.as_object() {
                Some(fields) => update_type_section(target, key, fields, comment),
                None => error!("Invalid resource config for '{}': expected a mapping, found {}", key, kind(section)),
            }
        }

        Ok(())
    }
}

fn update_type_section(target: &mut ResourceConfig, type_name: &str, fields: &Map<String, Value>, comment: &str) {
    debug!("Importing resource type '{}'", type_name);
    target.types.ensure(type_name);

    let path_offset = fields.get(PATH_OFFSET_FIELD).and_then(Value::as_i64);
    let path_replace = fields.get(PATH_REPLACE_FIELD).and_then(Value::as_i64);

    for (key, value) in fields {
        if key == PATH_OFFSET_FIELD || key == PATH_REPLACE_FIELD || is_comment(key, comment) {
            continue;
        }

        if let Some(field) = ExtensionField::from_key(key)
            && let Some(data) = value.as_object()
        {
            target.tables.merge(field, type_name, data, comment);
            continue;
        }

        if key == "path"
            && (path_offset.is_some() || path_replace.is_some())
            && let ListOp::Replace(paths) = ListOp::decode(value)
        {
            let offset = path_offset.unwrap_or(0);
            let remove = path_replace.unwrap_or(if offset == 0 { -1 } else { 0 });
            target.types.add_resource_paths(type_name, &paths, offset, remove);
            continue;
        }

        target.types.set_type_property(type_name, key, value);
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
