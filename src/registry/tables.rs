//! Per-type group and URL tables.
//!
//! Both tables are keyed by `(type, name)`. They are edited by merge-by-key:
//! importing a mapping overwrites existing names and leaves the rest alone, and
//! names starting with the comment prefix are skipped.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{error, warn};

use crate::constants::{GROUPS_FIELD, URLS_FIELD};
use crate::core::ResourceRef;

/// The extension fields of a type's configuration section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionField {
    /// `groups` - name → list of member references
    Groups,
    /// `urls` - name → literal URL
    Urls,
}

impl ExtensionField {
    /// Recognise an extension field by its configuration key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            GROUPS_FIELD => Some(Self::Groups),
            URLS_FIELD => Some(Self::Urls),
            _ => None,
        }
    }
}

/// Group and URL definitions for every type.
#[derive(Debug, Clone, Default)]
pub struct ExtensionTables {
    groups: HashMap<String, HashMap<String, Vec<ResourceRef>>>,
    urls: HashMap<String, HashMap<String, String>>,
}

impl ExtensionTables {
    /// Create empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a group definition.
    pub fn group(&self, type_name: &str, name: &str) -> Option<&[ResourceRef]> {
        self.groups.get(type_name)?.get(name).map(Vec::as_slice)
    }

    /// Look up a URL alias.
    pub fn url(&self, type_name: &str, name: &str) -> Option<&str> {
        self.urls.get(type_name)?.get(name).map(String::as_str)
    }

    /// All groups of one type, sorted by name.
    pub fn groups_of(&self, type_name: &str) -> Vec<(&str, &[ResourceRef])> {
        let mut groups: Vec<(&str, &[ResourceRef])> = self
            .groups
            .get(type_name)
            .map(|g| g.iter().map(|(k, v)| (k.as_str(), v.as_slice())).collect())
            .unwrap_or_default();
        groups.sort_by(|a, b| a.0.cmp(b.0));
        groups
    }

    /// All URL aliases of one type, sorted by name.
    pub fn urls_of(&self, type_name: &str) -> Vec<(&str, &str)> {
        let mut urls: Vec<(&str, &str)> = self
            .urls
            .get(type_name)
            .map(|u| u.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect())
            .unwrap_or_default();
        urls.sort();
        urls
    }

    /// Types that have at least one group, sorted.
    pub fn group_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.groups.keys().map(String::as_str).collect();
        types.sort();
        types
    }

    /// Define or replace a group.
    pub fn set_group(&mut self, type_name: &str, name: &str, members: Vec<ResourceRef>) {
        self.groups
            .entry(type_name.to_string())
            .or_default()
            .insert(name.to_string(), members);
    }

    /// Define or replace a URL alias.
    pub fn set_url(&mut self, type_name: &str, name: &str, url: impl Into<String>) {
        self.urls
            .entry(type_name.to_string())
            .or_default()
            .insert(name.to_string(), url.into());
    }

    /// Merge a configuration mapping into one of the tables.
    ///
    /// Keys starting with `comment` are skipped. Entries whose value has the wrong
    /// shape are logged and skipped; the rest of the mapping is still merged.
    pub fn merge(&mut self, field: ExtensionField, type_name: &str, data: &Map<String, Value>, comment: &str) {
        for (key, value) in data {
            if is_comment(key, comment) {
                continue;
            }
            match field {
                ExtensionField::Groups => match decode_members(type_name, key, value) {
                    Some(members) => self.set_group(type_name, key, members),
                    None => error!("Invalid group '{}:{}': {}", type_name, key, value),
                },
                ExtensionField::Urls => match value {
                    Value::String(url) => self.set_url(type_name, key, url.clone()),
                    other => error!("Invalid URL '{}:{}': {}", type_name, key, other),
                },
            }
        }
    }
}

/// Whether a configuration key is commented out.
pub(crate) fn is_comment(key: &str, comment: &str) -> bool {
    !comment.is_empty() && key.starts_with(comment)
}

fn decode_members(type_name: &str, group: &str, value: &Value) -> Option<Vec<ResourceRef>> {
    let raw: Vec<&str> = match value {
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        Value::String(single) => vec![single.as_str()],
        _ => return None,
    };

    let members = raw
        .into_iter()
        .filter_map(|member| match ResourceRef::from_str(member) {
            Ok(r) => Some(r),
            Err(e) => {
                warn!("Skipping member of group '{}:{}': {}", type_name, group, e);
                None
            }
        })
        .collect();
    Some(members)
}
