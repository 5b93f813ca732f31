//! Directory tree nodes for the folder browser.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One node of a lazily materialized directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    /// Absolute path; serves as the node's identity.
    pub path: PathBuf,
    /// Display label: the path's final segment.
    pub name: String,
    /// Child nodes, attached on first expansion.
    #[serde(default)]
    pub children: Vec<DirectoryNode>,
    /// Whether children have been enumerated. Distinguishes a directory that
    /// was expanded and found empty from one never expanded at all.
    #[serde(default)]
    pub expanded: bool,
}

impl DirectoryNode {
    /// Build an unexpanded node for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self {
            path,
            name,
            children: Vec::new(),
            expanded: false,
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
