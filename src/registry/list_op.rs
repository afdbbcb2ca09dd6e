//! Structural edits of ordered list properties.
//!
//! Configuration files describe list edits with sentinel keys:
//!
//! ```json
//! { "path": { "$splice": [1, 1, "w"] } }
//! { "exts": { "$push": [".mjs"] } }
//! { "path": ["/assets", "/vendor"] }
//! ```
//!
//! [`ListOp::decode`] turns such a value into a tagged command once, and
//! [`ListOp::apply`] is the only place a list is mutated.

use serde_json::Value;
use tracing::debug;

use crate::constants::{PUSH_KEY, SPLICE_KEY};

/// An edit of an ordered list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOp {
    /// Replace the whole list
    Replace(Vec<String>),
    /// Remove `remove` elements at `offset` and insert `values` there
    Splice {
        /// Start position; negative counts back from the end
        offset: i64,
        /// Number of elements to remove; negative leaves that many at the end
        remove: i64,
        /// Elements inserted at `offset`
        values: Vec<String>,
    },
    /// Append to the end
    Push(Vec<String>),
}

impl ListOp {
    /// Decode a configuration value into a list edit.
    ///
    /// Anything that is neither a list, a well-formed `$splice` command nor a
    /// `$push` command is forced into a list and used as a replacement.
    pub fn decode(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self::Replace(items.iter().filter_map(scalar_string).collect()),
            Value::Object(map) => {
                if let Some(splice) = map.get(SPLICE_KEY).and_then(decode_splice) {
                    return splice;
                }
                if let Some(push) = map.get(PUSH_KEY) {
                    return Self::Push(coerce_list(push));
                }
                debug!("Malformed list command {}, treating its values as a list", value);
                Self::Replace(map.values().flat_map(coerce_list).collect())
            }
            other => Self::Replace(coerce_list(other)),
        }
    }

    /// Apply the edit to `list`.
    ///
    /// Splice offsets and counts are clamped to the current list length the same
    /// way array splicing works in most dynamic languages:
    /// - a negative `offset` starts that far from the end (never before 0)
    /// - an `offset` past the end appends
    /// - a negative `remove` stops that far from the end
    pub fn apply(&self, list: &mut Vec<String>) {
        match self {
            Self::Replace(values) => *list = values.clone(),
            Self::Push(values) => list.extend(values.iter().cloned()),
            Self::Splice {
                offset,
                remove,
                values,
            } => {
                let len = list.len() as i64;
                let start = if *offset < 0 {
                    (len + offset).max(0)
                } else {
                    (*offset).min(len)
                };
                let end = if *remove < 0 {
                    (len + remove).max(start)
                } else {
                    start.saturating_add(*remove).min(len)
                };
                list.splice(start as usize..end as usize, values.iter().cloned());
            }
        }
    }
}

fn decode_splice(value: &Value) -> Option<ListOp> {
    let items = value.as_array()?;
    if items.len() < 2 {
        return None;
    }
    let offset = integer(&items[0])?;
    let remove = integer(&items[1])?;
    Some(ListOp::Splice {
        offset,
        remove,
        values: items[2..].iter().filter_map(scalar_string).collect(),
    })
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_string).collect(),
        other => scalar_string(other).into_iter().collect(),
    }
}
