//! Type registry and extension tables.
//!
//! [`TypeRegistry`] holds one [`ResourceType`] per type name and applies the
//! structural edits the configuration layer asks for. [`ExtensionTables`] holds
//! the per-type group and URL tables.
//!
//! # Structural edits
//!
//! ```rust
//! use resdeps::registry::TypeRegistry;
//! use serde_json::json;
//!
//! let mut registry = TypeRegistry::new();
//! registry.set_type_property("js", "path", &json!(["x", "y", "z"]));
//! registry.add_resource_paths("js", &["w"], 1, 1);
//! assert_eq!(registry.get("js").unwrap().search_paths, vec!["x", "w", "z"]);
//!
//! // Unknown types are created on first edit
//! registry.set_type_property("img", "exts", &json!([".webp", ".png"]));
//! assert!(registry.contains("img"));
//! ```

pub mod list_op;
pub mod tables;

pub use list_op::ListOp;
pub use tables::{ExtensionField, ExtensionTables};

use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, error, warn};

use crate::core::{ListProperty, ResourceType, TypeProperty};

/// Registry of resource type definitions.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: HashMap<String, ResourceType>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a registry containing the built-in `js`, `css` and `font` types.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for def in ResourceType::builtins() {
            registry.register(def);
        }
        registry
    }

    /// Create a registry with no types at all.
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Insert or replace a whole definition.
    pub fn register(&mut self, def: ResourceType) {
        self.types.insert(def.name.clone(), def);
    }

    /// Look up a type definition.
    pub fn get(&self, name: &str) -> Option<&ResourceType> {
        self.types.get(name)
    }

    /// Whether a definition exists for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Get the definition for `name`, creating an empty one if needed.
    pub fn ensure(&mut self, name: &str) -> &mut ResourceType {
        self.types.entry(name.to_string()).or_insert_with(|| {
            debug!("Creating resource type '{}'", name);
            ResourceType::new(name)
        })
    }

    /// Type names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.keys().cloned().collect();
        names.sort();
        names
    }

    /// Definitions, sorted by type name.
    pub fn iter(&self) -> impl Iterator<Item = &ResourceType> {
        let mut defs: Vec<&ResourceType> = self.types.values().collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs.into_iter()
    }

    /// Update one property of a type definition from a configuration value.
    ///
    /// The type is created if it does not exist yet. List properties (`path`,
    /// `exts`) accept a literal list, a `$splice` command or a `$push` command;
    /// scalar properties are type-checked and a mismatch is logged and ignored.
    ///
    /// Returns `true` when the value was applied.
    pub fn set_type_property(&mut self, type_name: &str, key: &str, value: &Value) -> bool {
        self.ensure(type_name);

        match key.parse::<TypeProperty>() {
            Ok(property) => self.set_property(type_name, property, value),
            Err(reason) => {
                warn!("Ignoring '{}' on resource type '{}': {}", key, type_name, reason);
                false
            }
        }
    }

    /// Typed form of [`set_type_property`](Self::set_type_property).
    pub fn set_property(&mut self, type_name: &str, property: TypeProperty, value: &Value) -> bool {
        let def = self.ensure(type_name);

        match (property, value) {
            (TypeProperty::List(list), _) => {
                ListOp::decode(value).apply(def.list_mut(list));
                true
            }
            (TypeProperty::As, Value::String(s)) => {
                def.as_keyword = s.clone();
                true
            }
            (TypeProperty::Name, Value::String(s)) => {
                def.collection_name = s.clone();
                true
            }
            (TypeProperty::Warn, Value::Bool(b)) => {
                def.warn_on_missing = Some(*b);
                true
            }
            (TypeProperty::Warn, Value::Null) => {
                def.warn_on_missing = None;
                true
            }
            (TypeProperty::Link, Value::Bool(b)) => {
                def.use_link_header = Some(*b);
                true
            }
            (TypeProperty::Link, Value::Null) => {
                def.use_link_header = None;
                true
            }
            (property, value) => {
                error!(
                    "Invalid '{}' value for resource type '{}': {} (expected {})",
                    property,
                    type_name,
                    value,
                    property.accepted_kinds()
                );
                false
            }
        }
    }

    /// Apply an already-decoded edit to a list property.
    pub fn edit_list(&mut self, type_name: &str, list: ListProperty, op: &ListOp) {
        op.apply(self.ensure(type_name).list_mut(list));
    }

    /// Add search paths to a type.
    ///
    /// - `remove == -1` replaces the entire path list
    /// - `offset == -1 && remove == 0` appends
    /// - anything else splices `paths` in at `offset`, removing `remove` entries
    pub fn add_resource_paths<S: AsRef<str>>(
        &mut self,
        type_name: &str,
        paths: &[S],
        offset: i64,
        remove: i64,
    ) {
        let values: Vec<String> = paths.iter().map(|p| p.as_ref().to_string()).collect();

        let op = if remove == -1 {
            ListOp::Replace(values)
        } else if offset == -1 && remove == 0 {
            ListOp::Push(values)
        } else {
            ListOp::Splice {
                offset,
                remove,
                values,
            }
        };

        self.edit_list(type_name, ListProperty::Path, &op);
    }
}
