//! Listing model
//!
//! `--list` maps every directory entry to a [`ListEntry`] before rendering.

use serde::{Deserialize, Serialize};

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    /// File type and permissions (`-rw-r--r--`)
    pub mode: String,

    /// Size in bytes
    pub size: u64,

    /// Modification time, RFC 3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,

    /// Entry name (base name, not the full path)
    pub name: String,

    pub is_dir: bool,
}

impl ListEntry {
    pub fn new(name: impl Into<String>, mode: impl Into<String>, size: u64) -> Self {
        Self {
            mode: mode.into(),
            size,
            modified: None,
            name: name.into(),
            is_dir: false,
        }
    }

    /// Set modification time
    pub fn with_modified(mut self, modified: impl Into<String>) -> Self {
        self.modified = Some(modified.into());
        self
    }

    /// Mark as directory
    pub fn with_dir(mut self, is_dir: bool) -> Self {
        self.is_dir = is_dir;
        self
    }
}

/// Entries of one listed path
#[derive(Debug, Clone, Default, Serialize)]
pub struct Listing {
    pub entries: Vec<ListEntry>,
}

impl Listing {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: ListEntry) {
        self.entries.push(entry);
    }

    /// Sort entries by name for stable output
    pub fn sort(&mut self) {
        self.entries.sort_by(|a, b| a.name.cmp(&b.name));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
