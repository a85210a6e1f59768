use crate::classifier::normalize_path;
use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Read-only access to file contents in the reviewed checkout.
///
/// Rules only ever read test sources and the Jest results file through this
/// trait, so the engine can run against an in-memory tree in tests.
pub trait ContentReader {
    fn read_to_string(&self, path: &str) -> Result<String>;

    /// Reader name for debugging/logging
    fn name(&self) -> &str;

    /// Directory relative paths are resolved against, if any
    fn root(&self) -> Option<&Path> {
        None
    }
}

/// Reads files relative to a repository root
pub struct FsContentReader {
    root: PathBuf,
}

impl FsContentReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let candidate = Path::new(path);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root.join(normalize_path(path))
        }
    }
}

impl ContentReader for FsContentReader {
    fn read_to_string(&self, path: &str) -> Result<String> {
        let resolved = self.resolve(path);
        fs::read_to_string(&resolved)
            .with_context(|| format!("failed to read {}", resolved.display()))
    }

    fn name(&self) -> &str {
        "filesystem"
    }

    fn root(&self) -> Option<&Path> {
        Some(&self.root)
    }
}

/// Fixed set of files held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentReader {
    files: BTreeMap<String, String>,
}

impl InMemoryContentReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: &str, content: impl Into<String>) {
        self.files.insert(normalize_path(path), content.into());
    }
}

impl ContentReader for InMemoryContentReader {
    fn read_to_string(&self, path: &str) -> Result<String> {
        self.files
            .get(&normalize_path(path))
            .cloned()
            .ok_or_else(|| anyhow!("no such file: {path}"))
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}
