//! Asset trees and probes for resolver tests.

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::resolver::FileProbe;

/// Asset files under a temporary directory, removed on drop.
pub struct AssetTree {
    dir: TempDir,
}

impl AssetTree {
    /// Create an empty tree.
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new().context("Failed to create temporary asset directory")?,
        })
    }

    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A directory inside the tree as a `/`-separated string suitable for
    /// search paths. The directory itself need not exist.
    pub fn dir(&self, relative: &str) -> String {
        let root = self.path().to_string_lossy().replace('\\', "/");
        if relative.is_empty() {
            root
        } else {
            format!("{root}/{relative}")
        }
    }

    /// Create an empty file (and its parent directories) at `relative`.
    pub fn add(&self, relative: &str) -> Result<PathBuf> {
        self.write(relative, "")
    }

    /// Create a file with `content` at `relative`.
    pub fn write(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// In-memory [`FileProbe`] that records every path it is asked about.
#[derive(Debug, Default)]
pub struct MemoryProbe {
    files: RefCell<HashSet<PathBuf>>,
    probed: RefCell<Vec<String>>,
}

impl MemoryProbe {
    /// A probe where nothing exists.
    pub fn new() -> Self {
        Self::default()
    }

    /// A probe where exactly `files` exist.
    pub fn with_files<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let probe = Self::new();
        for file in files {
            probe.add(file);
        }
        probe
    }

    /// Make another file exist.
    pub fn add(&self, file: impl Into<PathBuf>) {
        self.files.borrow_mut().insert(file.into());
    }

    /// Every path probed so far, in order.
    pub fn probed(&self) -> Vec<String> {
        self.probed.borrow().clone()
    }

    /// Number of probes so far.
    pub fn probe_count(&self) -> usize {
        self.probed.borrow().len()
    }
}

impl FileProbe for MemoryProbe {
    fn exists(&self, path: &Path) -> bool {
        self.probed.borrow_mut().push(path.to_string_lossy().into_owned());
        self.files.borrow().contains(path)
    }
}
