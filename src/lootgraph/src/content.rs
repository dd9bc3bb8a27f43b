//! Raw file content providers
//!
//! Parsers never touch the filesystem directly. Anything that can turn a
//! relative path into text can back them: a data directory on disk, or an
//! in-memory fixture set in tests.

use crate::error::ContentError;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Source of raw file text, keyed by `/`-separated relative path
pub trait ContentProvider: Send + Sync {
    /// Read the full text of a file
    fn read(&self, path: &str) -> Result<String, ContentError>;
}

/// Reader for a directory of data files
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
    files: Vec<String>,
}

impl DirectoryProvider {
    /// Open a directory and index the JSON files beneath it
    ///
    /// A missing directory yields an empty index rather than an error; some
    /// versions simply have no files of a given category.
    pub fn open<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let mut files = Vec::new();

        for entry in walkdir::WalkDir::new(&root)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let entry_path = entry.path();
            let is_json = entry_path.extension().map(|e| e == "json").unwrap_or(false);
            if !entry_path.is_file() || !is_json {
                continue;
            }
            if let Ok(relative) = entry_path.strip_prefix(&root) {
                files.push(to_key(relative));
            }
        }

        files.sort();
        Self { root, files }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All indexed files, sorted, as `/`-separated relative paths
    pub fn list_files(&self) -> &[String] {
        &self.files
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, ContentError> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(ContentError::OutsideRoot(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl ContentProvider for DirectoryProvider {
    fn read(&self, path: &str) -> Result<String, ContentError> {
        let full = self.resolve(path)?;
        if !full.is_file() {
            return Err(ContentError::NotFound(path.to_string()));
        }
        Ok(std::fs::read_to_string(&full)?)
    }
}

/// In-memory file set
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    files: HashMap<String, String>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    /// Builder-style insert
    pub fn with(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ContentProvider for MemoryProvider {
    fn read(&self, path: &str) -> Result<String, ContentError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| ContentError::NotFound(path.to_string()))
    }
}

fn to_key(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
