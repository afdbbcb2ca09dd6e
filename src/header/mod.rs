//! Preload `Link` header emission.
//!
//! When a type's effective `link` flag is on, every resolved file produces one
//! additive header:
//!
//! ```text
//! Link: <{prefix}{file}>; rel=preload; as={as}
//! ```
//!
//! The prefix comes from one of three strategies ([`PrefixMode`]):
//!
//! | Mode | Strategy     | Prefix                                                    |
//! |------|--------------|-----------------------------------------------------------|
//! | 0    | `Static`     | the configured prefix string, verbatim                    |
//! | 1    | `PerType`    | callback named by the prefix, called once per type        |
//! | 2    | `PerCall`    | callback named by the prefix, called for every resource   |
//!
//! Callbacks are looked up by name in a [`PrefixCallbacks`] table populated by the
//! application. A name with no registered callback logs an error and yields an
//! empty prefix.
//!
//! ```rust
//! use resdeps::header::{HeaderEmitter, HeaderList, PrefixCallbacks, PrefixMode};
//!
//! let mut callbacks = PrefixCallbacks::new();
//! callbacks.register("cdn", |req| format!("https://cdn.example.com/{}/", req.type_name));
//!
//! let mut emitter = HeaderEmitter::new("cdn", PrefixMode::PerType, Some(&callbacks));
//! let mut headers = HeaderList::new();
//! emitter.emit(&mut headers, "js", "app", "script", "assets/app.js");
//!
//! assert_eq!(
//!     headers.values("Link"),
//!     vec!["<https://cdn.example.com/js/assets/app.js>; rel=preload; as=script"]
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, error};

/// Name of the preload header.
pub const LINK_HEADER: &str = "Link";

/// Destination for HTTP response headers.
///
/// Headers are additive: appending never replaces an earlier header of the same
/// name, and nothing can be taken back once appended.
pub trait HeaderSink {
    /// Append one header.
    fn append_header(&mut self, name: &str, value: &str);
}

/// Ordered, append-only header collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeaderList {
    headers: Vec<(String, String)>,
}

impl HeaderList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// All headers in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Values of every header called `name`, in emission order.
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Whether no header was emitted.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl HeaderSink for HeaderList {
    fn append_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }
}

/// How the preload prefix is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PrefixMode {
    /// Use the configured prefix verbatim
    #[default]
    Static,
    /// Call the named callback once per type and reuse its result
    PerType,
    /// Call the named callback for every resolved resource
    PerCall,
}

impl TryFrom<u8> for PrefixMode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Static),
            1 => Ok(Self::PerType),
            2 => Ok(Self::PerCall),
            other => Err(format!("invalid prefix mode {other}, expected 0, 1 or 2")),
        }
    }
}

impl From<PrefixMode> for u8 {
    fn from(mode: PrefixMode) -> Self {
        match mode {
            PrefixMode::Static => 0,
            PrefixMode::PerType => 1,
            PrefixMode::PerCall => 2,
        }
    }
}

/// Arguments handed to a prefix callback.
///
/// In [`PrefixMode::PerType`] only `type_name` is set.
#[derive(Debug, Clone, Copy)]
pub struct PrefixRequest<'a> {
    /// Resource type being resolved
    pub type_name: &'a str,
    /// Resolved file (per-call mode only)
    pub file: Option<&'a str>,
    /// Requested resource name (per-call mode only)
    pub name: Option<&'a str>,
}

/// A registered prefix callback.
pub type PrefixCallback = Box<dyn Fn(&PrefixRequest<'_>) -> String>;

/// Named prefix callbacks.
#[derive(Default)]
pub struct PrefixCallbacks {
    callbacks: HashMap<String, PrefixCallback>,
}

impl PrefixCallbacks {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a callback under `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, callback: F)
    where
        F: Fn(&PrefixRequest<'_>) -> String + 'static,
    {
        self.callbacks.insert(name.into(), Box::new(callback));
    }

    /// Look up a callback.
    pub fn get(&self, name: &str) -> Option<&PrefixCallback> {
        self.callbacks.get(name)
    }
}

impl fmt::Debug for PrefixCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.callbacks.keys().collect();
        names.sort();
        f.debug_struct("PrefixCallbacks").field("names", &names).finish()
    }
}

/// Builds and emits preload headers for one render pass.
#[derive(Debug)]
pub struct HeaderEmitter<'a> {
    prefix: String,
    mode: PrefixMode,
    callbacks: Option<&'a PrefixCallbacks>,
    type_prefixes: HashMap<String, String>,
}

impl<'a> HeaderEmitter<'a> {
    /// Create an emitter. The configured prefix is trimmed.
    pub fn new(prefix: &str, mode: PrefixMode, callbacks: Option<&'a PrefixCallbacks>) -> Self {
        Self {
            prefix: prefix.trim().to_string(),
            mode,
            callbacks,
            type_prefixes: HashMap::new(),
        }
    }

    /// Compute the prefix for one resolved file.
    pub fn prefix_for(&mut self, type_name: &str, name: &str, file: &str) -> String {
        if self.prefix.is_empty() {
            return String::new();
        }

        let per_call = match self.mode {
            PrefixMode::Static => return self.prefix.clone(),
            PrefixMode::PerType => false,
            PrefixMode::PerCall => true,
        };

        let Some(callback) = self.callbacks.and_then(|c| c.get(&self.prefix)) else {
            error!("Invalid link header prefix callback '{}'", self.prefix);
            return String::new();
        };

        if per_call {
            return callback(&PrefixRequest {
                type_name,
                file: Some(file),
                name: Some(name),
            });
        }

        self.type_prefixes
            .entry(type_name.to_string())
            .or_insert_with(|| {
                debug!("Computing link header prefix for type '{}'", type_name);
                callback(&PrefixRequest {
                    type_name,
                    file: None,
                    name: None,
                })
            })
            .clone()
    }

    /// Emit the preload header for a resolved file.
    pub fn emit(
        &mut self,
        sink: &mut dyn HeaderSink,
        type_name: &str,
        name: &str,
        as_keyword: &str,
        file: &str,
    ) {
        let prefix = self.prefix_for(type_name, name, file);
        let value = preload_value(&prefix, file, as_keyword);
        debug!("{}: {}", LINK_HEADER, value);
        sink.append_header(LINK_HEADER, &value);
    }

    /// Emit the preload header for a URL alias. URLs are never prefixed.
    pub fn emit_url(&self, sink: &mut dyn HeaderSink, as_keyword: &str, url: &str) {
        let value = preload_value("", url, as_keyword);
        debug!("{}: {}", LINK_HEADER, value);
        sink.append_header(LINK_HEADER, &value);
    }
}

/// Format a preload `Link` header value.
///
/// The `as=` parameter is omitted for types without a preload keyword.
pub fn preload_value(prefix: &str, target: &str, as_keyword: &str) -> String {
    if as_keyword.is_empty() {
        format!("<{prefix}{target}>; rel=preload")
    } else {
        format!("<{prefix}{target}>; rel=preload; as={as_keyword}")
    }
}
