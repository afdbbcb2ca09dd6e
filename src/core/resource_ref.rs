//! Group member references.
//!
//! Group definitions list their members as compact strings:
//! - `name` - a resource of the group's own type
//! - `!name` - force-block that resource while expanding the group
//! - `type:name` - a resource of another type
//! - `!type:name` - force-block a resource of another type
//!
//! Only the first two `:`-separated parts count: `font:icons:solid` names the
//! font `icons`.
//!
//! ```
//! use resdeps::core::ResourceRef;
//! use std::str::FromStr;
//!
//! let r = ResourceRef::from_str("!css:theme").unwrap();
//! assert!(r.blocked);
//! assert_eq!(r.type_name.as_deref(), Some("css"));
//! assert_eq!(r.name, "theme");
//! assert_eq!(r.target_type("js"), "css");
//!
//! let r = ResourceRef::from_str("jquery").unwrap();
//! assert_eq!(r.target_type("js"), "js");
//! ```

use anyhow::Result;
use std::fmt;
use std::str::FromStr;

use crate::constants::{BLOCK_MARKER, TYPE_SEPARATOR};
use crate::core::ResError;

/// A parsed group member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    /// Type qualifier; `None` means the enclosing group's type
    pub type_name: Option<String>,
    /// Resource or group name
    pub name: String,
    /// Whether the member carries the negation marker
    pub blocked: bool,
}

impl ResourceRef {
    /// A same-type, non-blocked reference.
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            type_name: None,
            name: name.into(),
            blocked: false,
        }
    }

    /// The type this reference resolves against, given the enclosing group's type.
    #[must_use]
    pub fn target_type<'a>(&'a self, current: &'a str) -> &'a str {
        self.type_name.as_deref().unwrap_or(current)
    }
}

impl FromStr for ResourceRef {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (blocked, rest) = match s.strip_prefix(BLOCK_MARKER) {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let mut parts = rest.split(TYPE_SEPARATOR);
        let first = parts.next().unwrap_or_default();
        let (type_name, name) = match parts.next() {
            Some(name_part) => {
                if first.is_empty() {
                    return Err(ResError::InvalidReference {
                        reference: s.to_string(),
                        reason: "type qualifier cannot be empty".to_string(),
                    }
                    .into());
                }
                (Some(first.to_string()), name_part)
            }
            None => (None, first),
        };

        if name.is_empty() {
            return Err(ResError::InvalidReference {
                reference: s.to_string(),
                reason: "resource name cannot be empty".to_string(),
            }
            .into());
        }

        Ok(Self {
            type_name,
            name: name.to_string(),
            blocked,
        })
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.blocked {
            write!(f, "{BLOCK_MARKER}")?;
        }
        if let Some(type_name) = &self.type_name {
            write!(f, "{type_name}{TYPE_SEPARATOR}")?;
        }
        write!(f, "{}", self.name)
    }
}
