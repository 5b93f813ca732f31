//! Flat-file conversation store: one text file per conversation id.

use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Per-id text files under a configurable base directory.
pub struct FileStore {
    log_dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `log_dir`, creating the directory if absent.
    pub fn new(log_dir: impl Into<PathBuf>) -> Result<Self> {
        let log_dir = log_dir.into();
        fs::create_dir_all(&log_dir)?;
        Ok(Self { log_dir })
    }

    /// Deterministic path for a conversation id.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.log_dir.join(format!("{}.txt", id))
    }

    /// The current base directory.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Write a rendered transcript, overwriting any previous contents.
    pub fn write(&self, id: &str, contents: &str) -> Result<()> {
        fs::write(self.path_for(id), contents)?;
        info!(target: "convodesk::store", "Conversation {} saved locally", id);
        Ok(())
    }

    /// Read a transcript from an arbitrary path. `None` when the file is
    /// absent (logged at warn, never an error).
    pub fn read(&self, path: &Path) -> Result<Option<String>> {
        if !path.exists() {
            warn!(
                target: "convodesk::store",
                "Conversation file {} not found",
                path.display()
            );
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        info!(
            target: "convodesk::store",
            "Conversation loaded from {}",
            path.display()
        );
        Ok(Some(contents))
    }

    /// Reassign the base directory for subsequent saves and loads, creating
    /// it if missing. Previously saved files are not migrated.
    pub fn set_dir(&mut self, new_dir: impl Into<PathBuf>) -> Result<()> {
        let new_dir = new_dir.into();
        fs::create_dir_all(&new_dir)?;
        self.log_dir = new_dir;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read_by_deterministic_path() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("logs")).unwrap();

        store.write("c1", "User: hi\nAssistant: hello").unwrap();

        let text = store.read(&store.path_for("c1")).unwrap().unwrap();
        assert_eq!(text, "User: hi\nAssistant: hello");
    }

    #[test]
    fn test_read_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        assert!(store.read(&store.path_for("nope")).unwrap().is_none());
    }

    #[test]
    fn test_write_overwrites_unconditionally() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        store.write("c1", "first").unwrap();
        store.write("c1", "second").unwrap();

        let text = store.read(&store.path_for("c1")).unwrap().unwrap();
        assert_eq!(text, "second");
    }

    #[test]
    fn test_set_dir_redirects_and_leaves_old_files_behind() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("a")).unwrap();
        store.write("c1", "old").unwrap();
        let old_path = store.path_for("c1");

        store.set_dir(dir.path().join("b")).unwrap();
        store.write("c1", "new").unwrap();

        assert_eq!(std::fs::read_to_string(&old_path).unwrap(), "old");
        assert_eq!(
            std::fs::read_to_string(store.path_for("c1")).unwrap(),
            "new"
        );
    }
}
