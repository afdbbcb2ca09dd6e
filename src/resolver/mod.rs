//! Resource resolution for one render pass.
//!
//! A [`Resolver`] turns requests like "use js `app`" into an ordered list of
//! files and URLs per output collection, plus the preload headers that go with
//! them. It reads a [`ResourceConfig`] and owns the per-pass state: the
//! [`LoadedCache`], the [`RenderData`] and the [`HeaderList`]. Headers can also
//! be streamed to a caller's [`HeaderSink`] as they are emitted
//! ([`Resolver::with_sink`]).
//!
//! # Resolution
//!
//! Each `(type, name)` pair is decided at most once per pass. In order:
//!
//! 1. a pair that is already decided is a no-op returning `true`
//! 2. an undefined type returns `false`
//! 3. a group is recorded as expanded, then every member is resolved
//!    depth-first in list order with `block || member.blocked`; members with a
//!    type qualifier resolve against that type
//! 4. a blocked name is recorded as [`Loaded::Blocked`] and produces nothing
//! 5. a URL alias is appended as `{ "url": ... }` without touching the filesystem
//! 6. otherwise the [`PathFinder`] probes `dir/name+ext`; a hit is appended (and
//!    preloaded when the type's `link` flag is on), a miss is logged when the
//!    type's `warn` flag is on and is **not** recorded, so it can be retried
//!
//! Re-entering a group that is still being expanded fails with
//! [`ResError::CyclicGroup`].
//!
//! # Example
//!
//! ```rust
//! use resdeps::config::{ConfigImporter, ResourceConfig};
//! use resdeps::resolver::{FileProbe, OutputEntry, Resolver};
//! use serde_json::json;
//! use std::path::Path;
//!
//! struct Present(&'static [&'static str]);
//!
//! impl FileProbe for Present {
//!     fn exists(&self, path: &Path) -> bool {
//!         self.0.iter().any(|f| Path::new(f) == path)
//!     }
//! }
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut config = ResourceConfig::new();
//! ConfigImporter::inline_only().load_resource_config(
//!     &mut config,
//!     &json!({"css": {"path": ["/assets"], "exts": [".css"], "groups": {"base": ["reset", "theme"]}}}),
//!     None,
//!     "--",
//! )?;
//!
//! let probe = Present(&["/assets/reset.css", "/assets/theme.css"]);
//! let mut resolver = Resolver::new(&config).with_probe(&probe);
//! assert!(resolver.use_resource("css", "base", false)?);
//!
//! assert_eq!(
//!     resolver.render_data().collection("stylesheets"),
//!     &[
//!         OutputEntry::File("/assets/reset.css".to_string()),
//!         OutputEntry::File("/assets/theme.css".to_string()),
//!     ]
//! );
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod cache;
pub mod group_graph;
pub mod output;
pub mod path_finder;

pub use cache::{Loaded, LoadedCache};
pub use group_graph::{GroupGraph, GroupNode, UnknownMember};
pub use output::{OutputEntry, RenderData};
pub use path_finder::{FileProbe, FsProbe, PathFinder};

use anyhow::Result;
use tracing::{debug, trace, warn};

use crate::config::ResourceConfig;
use crate::core::{ResError, ResourceRef, ResourceType};
use crate::header::{HeaderEmitter, HeaderList, HeaderSink, PrefixCallbacks};
use group_graph::render_chain;

static FS_PROBE: FsProbe = FsProbe;

/// Per-pass resource resolver.
pub struct Resolver<'a> {
    config: &'a ResourceConfig,
    probe: &'a dyn FileProbe,
    emitter: HeaderEmitter<'a>,
    loaded: LoadedCache,
    output: RenderData,
    headers: HeaderList,
    sink: Option<&'a mut dyn HeaderSink>,
    expanding: Vec<GroupNode>,
}

impl<'a> Resolver<'a> {
    /// Create a resolver that probes the real filesystem and has no prefix callbacks.
    pub fn new(config: &'a ResourceConfig) -> Self {
        let settings = &config.settings;
        Self {
            config,
            probe: &FS_PROBE,
            emitter: HeaderEmitter::new(&settings.link_header_prefix, settings.prefix_mode, None),
            loaded: LoadedCache::new(),
            output: RenderData::new(),
            headers: HeaderList::new(),
            sink: None,
            expanding: Vec::new(),
        }
    }

    /// Probe candidate files through `probe` instead of the filesystem.
    #[must_use]
    pub fn with_probe(mut self, probe: &'a dyn FileProbe) -> Self {
        self.probe = probe;
        self
    }

    /// Also send every header to `sink` the moment it is emitted.
    ///
    /// The pass still records its own copy, available through
    /// [`headers`](Self::headers).
    #[must_use]
    pub fn with_sink(mut self, sink: &'a mut dyn HeaderSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Use `callbacks` to compute header prefixes in modes 1 and 2.
    #[must_use]
    pub fn with_callbacks(mut self, callbacks: &'a PrefixCallbacks) -> Self {
        let settings = &self.config.settings;
        self.emitter =
            HeaderEmitter::new(&settings.link_header_prefix, settings.prefix_mode, Some(callbacks));
        self
    }

    /// Resolve one resource, group or URL alias.
    ///
    /// Returns `Ok(false)` when the type is undefined or no file was found, and
    /// `Ok(true)` for everything else, including no-ops and blocks.
    ///
    /// # Errors
    ///
    /// [`ResError::CyclicGroup`] when group expansion re-enters a group that
    /// is still being expanded.
    pub fn use_resource(&mut self, type_name: &str, name: &str, block: bool) -> Result<bool> {
        if let Some(start) = self.expanding.iter().position(|g| g.type_name == type_name && g.name == name)
        {
            let mut chain = self.expanding[start..].to_vec();
            chain.push(GroupNode::new(type_name, name));
            return Err(ResError::CyclicGroup {
                chain: render_chain(&chain),
            }
            .into());
        }

        if self.loaded.contains(type_name, name) {
            trace!("{}:{} already processed", type_name, name);
            return Ok(true);
        }

        let config = self.config;
        let Some(def) = config.types.get(type_name) else {
            debug!("Unknown resource type '{}' for '{}'", type_name, name);
            return Ok(false);
        };

        if let Some(members) = config.tables.group(type_name, name) {
            self.expand_group(type_name, name, members, block)?;
            return Ok(true);
        }

        if block {
            debug!("Blocking {}:{}", type_name, name);
            self.loaded.insert(type_name, name, Loaded::Blocked);
            return Ok(true);
        }

        if let Some(url) = config.tables.url(type_name, name) {
            self.include_url(def, name, url);
            return Ok(true);
        }

        match PathFinder::new(&config.types, self.probe).find(type_name, name) {
            Some(file) => {
                self.include_file(def, name, file);
                Ok(true)
            }
            None => {
                if def.effective_warn(config.settings.warn_on_missing) {
                    warn!("Could not find {} file for: '{}'", type_name, name);
                }
                Ok(false)
            }
        }
    }

    /// Resolve several names of one type, in order.
    ///
    /// Always returns `Ok(true)`; individual misses are handled as in
    /// [`use_resource`](Self::use_resource).
    pub fn use_resources<S: AsRef<str>>(&mut self, type_name: &str, names: &[S], block: bool) -> Result<bool> {
        for name in names {
            self.use_resource(type_name, name.as_ref(), block)?;
        }
        Ok(true)
    }

    /// Include scripts.
    pub fn add_js<S: AsRef<str>>(&mut self, names: &[S]) -> Result<bool> {
        self.use_resources("js", names, false)
    }

    /// Include stylesheets.
    pub fn add_css<S: AsRef<str>>(&mut self, names: &[S]) -> Result<bool> {
        self.use_resources("css", names, false)
    }

    /// Block scripts from being included later in this pass.
    pub fn block_js<S: AsRef<str>>(&mut self, names: &[S]) -> Result<bool> {
        self.use_resources("js", names, true)
    }

    /// Block stylesheets from being included later in this pass.
    pub fn block_css<S: AsRef<str>>(&mut self, names: &[S]) -> Result<bool> {
        self.use_resources("css", names, true)
    }

    /// Forget everything decided for `type_name` and drop its output collection.
    ///
    /// Headers already emitted stay emitted.
    pub fn reset_resource(&mut self, type_name: &str) {
        debug!("Resetting resource type '{}'", type_name);
        self.loaded.clear_type(type_name);
        if let Some(def) = self.config.types.get(type_name) {
            self.output.remove(&def.collection_name);
        }
    }

    /// Find the file a name would resolve to, without recording anything.
    pub fn find_resource(&self, type_name: &str, name: &str) -> Option<String> {
        PathFinder::new(&self.config.types, self.probe).find(type_name, name)
    }

    /// Output collections produced so far.
    pub fn render_data(&self) -> &RenderData {
        &self.output
    }

    /// Headers emitted so far.
    pub fn headers(&self) -> &HeaderList {
        &self.headers
    }

    /// Decisions recorded so far.
    pub fn loaded(&self) -> &LoadedCache {
        &self.loaded
    }

    /// End the pass and hand over its output and headers.
    pub fn finish(self) -> (RenderData, HeaderList) {
        (self.output, self.headers)
    }

    fn expand_group(&mut self, type_name: &str, name: &str, members: &[ResourceRef], block: bool) -> Result<()> {
        debug!("Expanding {}:{} ({} members)", type_name, name, members.len());
        self.loaded.insert(type_name, name, Loaded::Group);
        self.expanding.push(GroupNode::new(type_name, name));

        let mut result = Ok(());
        for member in members {
            let target = member.target_type(type_name);
            if let Err(e) = self.use_resource(target, &member.name, block || member.blocked) {
                result = Err(e);
                break;
            }
        }

        self.expanding.pop();
        result
    }

    fn include_url(&mut self, def: &ResourceType, name: &str, url: &str) {
        debug!("{}:{} resolved to URL {}", def.name, name, url);
        let settings = &self.config.settings;
        if settings.link_urls && def.effective_link(settings.use_link_header) {
            let mut sink = Tee {
                list: &mut self.headers,
                sink: self.sink.as_deref_mut(),
            };
            self.emitter.emit_url(&mut sink, &def.as_keyword, url);
        }
        self.output.append(&def.collection_name, OutputEntry::url(url));
        self.loaded.insert(&def.name, name, Loaded::Url(url.to_string()));
    }

    fn include_file(&mut self, def: &ResourceType, name: &str, file: String) {
        debug!("{}:{} resolved to {}", def.name, name, file);
        if def.effective_link(self.config.settings.use_link_header) {
            let mut sink = Tee {
                list: &mut self.headers,
                sink: self.sink.as_deref_mut(),
            };
            self.emitter.emit(&mut sink, &def.name, name, &def.as_keyword, &file);
        }
        self.output.append(&def.collection_name, OutputEntry::File(file.clone()));
        self.loaded.insert(&def.name, name, Loaded::File(file));
    }
}

/// Records headers in the pass's list and forwards them to the injected sink.
struct Tee<'s, 'a> {
    list: &'s mut HeaderList,
    sink: Option<&'s mut (dyn HeaderSink + 'a)>,
}

impl HeaderSink for Tee<'_, '_> {
    fn append_header(&mut self, name: &str, value: &str) {
        self.list.append_header(name, value);
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.append_header(name, value);
        }
    }
}
