//! File lookup over a type's search paths and extensions.
//!
//! For a type with search paths `[P1, P2]` and extensions `[E1, E2]`, resolving
//! `name` probes, in order:
//!
//! ```text
//! P1/nameE1, P1/nameE2, P2/nameE1, P2/nameE2
//! ```
//!
//! and returns the first candidate that exists. Paths are joined with `/` so the
//! returned string can be emitted directly into pages and headers.

use std::path::Path;
use tracing::trace;

use crate::registry::TypeRegistry;

/// Filesystem capability used to test candidate paths.
pub trait FileProbe {
    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> bool;
}

/// [`FileProbe`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl FileProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Finds the first existing file for a resource name.
pub struct PathFinder<'a> {
    types: &'a TypeRegistry,
    probe: &'a dyn FileProbe,
}

impl<'a> PathFinder<'a> {
    /// Create a path finder over `types`, testing candidates with `probe`.
    pub fn new(types: &'a TypeRegistry, probe: &'a dyn FileProbe) -> Self {
        Self {
            types,
            probe,
        }
    }

    /// Return the first existing `dir/name+ext` for `type_name`.
    ///
    /// Directories are the outer loop, extensions the inner one. Unknown types
    /// and types without paths or extensions find nothing.
    pub fn find(&self, type_name: &str, name: &str) -> Option<String> {
        let def = self.types.get(type_name)?;

        for dir in &def.search_paths {
            for ext in &def.extensions {
                let candidate = format!("{dir}/{name}{ext}");
                trace!("Probing {}", candidate);
                if self.probe.exists(Path::new(&candidate)) {
                    return Some(candidate);
                }
            }
        }

        None
    }
}
