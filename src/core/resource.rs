//! Resource type definitions
//!
//! A resource type is a named category of static assets (scripts, stylesheets,
//! fonts, or anything registered at runtime) together with the rules used to
//! find its files: search paths, extensions, and the flags that control warnings
//! and preload headers.
//!
//! # Built-in types
//!
//! | Type   | `as`     | Collection    | Extensions                          |
//! |--------|----------|---------------|-------------------------------------|
//! | `js`   | `script` | `scripts`     | `.min.js`, `.js`                    |
//! | `css`  | `style`  | `stylesheets` | `.min.css`, `.css`                  |
//! | `font` | `font`   | `fonts`       | `.woff2`, `.woff`, `.otf`, `.ttf`   |
//!
//! # Examples
//!
//! ```rust
//! use resdeps::core::ResourceType;
//!
//! let js = ResourceType::builtins().into_iter().find(|t| t.name == "js").unwrap();
//! assert_eq!(js.as_keyword, "script");
//! assert_eq!(js.collection_name, "scripts");
//! assert_eq!(js.extensions, vec![".min.js", ".js"]);
//!
//! // `warn` and `link` inherit the resolver defaults until overridden
//! assert!(js.effective_warn(true));
//! assert!(!js.effective_link(false));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::BUILTIN_TYPES;

/// Definition of one resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceType {
    /// Type name, e.g. `"js"`
    pub name: String,

    /// Keyword used as `as=` in preload headers, e.g. `"script"`
    #[serde(rename = "as")]
    pub as_keyword: String,

    /// Name of the output collection resolved entries are appended to
    pub collection_name: String,

    /// File suffixes, probed in order (most specific first)
    pub extensions: Vec<String>,

    /// Directories, probed in order
    pub search_paths: Vec<String>,

    /// Per-type override of the "warn on missing resource" default
    pub warn_on_missing: Option<bool>,

    /// Per-type override of the "emit preload Link header" default
    pub use_link_header: Option<bool>,
}

impl ResourceType {
    /// Create an empty definition for a custom type.
    ///
    /// The collection name defaults to the type name; there are no paths or
    /// extensions and both flags inherit the resolver defaults.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            collection_name: name.clone(),
            name,
            as_keyword: String::new(),
            extensions: Vec::new(),
            search_paths: Vec::new(),
            warn_on_missing: None,
            use_link_header: None,
        }
    }

    /// The `js`, `css` and `font` definitions every registry starts with.
    pub fn builtins() -> Vec<Self> {
        BUILTIN_TYPES
            .iter()
            .map(|(name, as_keyword, collection, exts)| Self {
                name: (*name).to_string(),
                as_keyword: (*as_keyword).to_string(),
                collection_name: (*collection).to_string(),
                extensions: exts.iter().map(|e| (*e).to_string()).collect(),
                search_paths: Vec::new(),
                warn_on_missing: None,
                use_link_header: None,
            })
            .collect()
    }

    /// Resolve the `warn` flag against the global default.
    #[must_use]
    pub fn effective_warn(&self, default: bool) -> bool {
        self.warn_on_missing.unwrap_or(default)
    }

    /// Resolve the `link` flag against the global default.
    #[must_use]
    pub fn effective_link(&self, default: bool) -> bool {
        self.use_link_header.unwrap_or(default)
    }

    /// Mutable access to one of the ordered list properties.
    pub fn list_mut(&mut self, list: ListProperty) -> &mut Vec<String> {
        match list {
            ListProperty::Path => &mut self.search_paths,
            ListProperty::Exts => &mut self.extensions,
        }
    }

    /// Shared access to one of the ordered list properties.
    pub fn list(&self, list: ListProperty) -> &[String] {
        match list {
            ListProperty::Path => &self.search_paths,
            ListProperty::Exts => &self.extensions,
        }
    }
}

/// The ordered-list properties of a type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListProperty {
    /// `path` - search directories
    Path,
    /// `exts` - file suffixes
    Exts,
}

/// A configurable property of a type definition, keyed as in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeProperty {
    /// `as` - preload keyword (string)
    As,
    /// `name` - output collection name (string)
    Name,
    /// `exts` or `path` - ordered list, supports splice/push edits
    List(ListProperty),
    /// `warn` - warn on missing resources (bool or null)
    Warn,
    /// `link` - emit preload headers (bool or null)
    Link,
}

impl TypeProperty {
    /// Configuration key of this property.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::As => "as",
            Self::Name => "name",
            Self::List(ListProperty::Exts) => "exts",
            Self::List(ListProperty::Path) => "path",
            Self::Warn => "warn",
            Self::Link => "link",
        }
    }

    /// Human-readable list of the value kinds accepted for this property.
    #[must_use]
    pub const fn accepted_kinds(self) -> &'static str {
        match self {
            Self::As | Self::Name => "string",
            Self::List(_) => "array or string",
            Self::Warn | Self::Link => "bool or null",
        }
    }
}

impl fmt::Display for TypeProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TypeProperty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "as" => Ok(Self::As),
            "name" => Ok(Self::Name),
            "exts" => Ok(Self::List(ListProperty::Exts)),
            "path" => Ok(Self::List(ListProperty::Path)),
            "warn" => Ok(Self::Warn),
            "link" => Ok(Self::Link),
            other => Err(format!("unknown type property '{other}'")),
        }
    }
}
