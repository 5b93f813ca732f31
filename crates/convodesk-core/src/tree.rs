//! Lazy directory tree materialization and text serialization.

use crate::Result;
use convodesk_types::DirectoryNode;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Indent unit for the full recursive rendering.
const INDENT: &str = "    ";

/// One enumerated entry of a directory.
#[derive(Debug, Clone)]
pub struct TreeEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Source of directory entries.
///
/// The indexer is generic over this seam so tests can substitute an
/// enumeration source and count calls.
pub trait DirReader {
    /// Entries of `dir`, in whatever order the source yields them.
    fn read_entries(&self, dir: &Path) -> io::Result<Vec<TreeEntry>>;
}

/// [`DirReader`] over the real filesystem, in `read_dir` order (not sorted).
#[derive(Debug, Default)]
pub struct FsDirReader;

impl DirReader for FsDirReader {
    fn read_entries(&self, dir: &Path) -> io::Result<Vec<TreeEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(_) => continue,
            };
            let path = entry.path();
            let is_dir = entry.file_type().map(|ty| ty.is_dir()).unwrap_or(false);
            entries.push(TreeEntry { path, is_dir });
        }
        Ok(entries)
    }
}

/// On-demand traversal of a filesystem subtree.
pub struct DirectoryIndexer<R = FsDirReader> {
    reader: R,
}

impl DirectoryIndexer<FsDirReader> {
    pub fn new() -> Self {
        Self {
            reader: FsDirReader,
        }
    }
}

impl Default for DirectoryIndexer<FsDirReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: DirReader> DirectoryIndexer<R> {
    /// Build an indexer over a custom entry source.
    pub fn with_reader(reader: R) -> Self {
        Self { reader }
    }

    /// Immediate children of `path`.
    ///
    /// A permission-denied enumeration yields an empty listing; partial
    /// results are valid results. Other I/O failures propagate.
    pub fn list_children(&self, path: &Path) -> Result<Vec<DirectoryNode>> {
        Ok(self
            .entries_best_effort(path)?
            .into_iter()
            .map(|entry| DirectoryNode::new(entry.path))
            .collect())
    }

    /// Attach children to `node` on first expansion.
    ///
    /// Idempotent: an already-expanded node is never re-listed, even when the
    /// expansion found zero children.
    pub fn expand(&self, node: &mut DirectoryNode) -> Result<()> {
        if node.expanded {
            return Ok(());
        }
        node.children = self.list_children(&node.path)?;
        node.expanded = true;
        Ok(())
    }

    /// Build a root node with its immediate children populated.
    pub fn root(&self, path: &Path) -> Result<DirectoryNode> {
        let mut node = DirectoryNode::new(path);
        self.expand(&mut node)?;
        Ok(node)
    }

    /// `path` followed by one line per immediate child's absolute path.
    /// Files and directories render identically; no recursion, no indent.
    pub fn render_shallow(&self, path: &Path) -> Result<String> {
        let mut out = format!("{}\n", path.display());
        for entry in self.entries_best_effort(path)? {
            out.push_str(&format!("{}\n", entry.path.display()));
        }
        Ok(out)
    }

    /// Recursive depth-first rendering with a four-space indent unit.
    ///
    /// Matches the historical output shape: a directory child appears at
    /// `prefix` and then again, unprefixed, as the head line of its own
    /// subtree. That double emission is part of the format contract.
    pub fn render_full(&self, path: &Path) -> Result<String> {
        self.render_full_with_prefix(path, "")
    }

    fn render_full_with_prefix(&self, path: &Path, prefix: &str) -> Result<String> {
        let mut out = format!("{}\n", path.display());
        for entry in self.entries_best_effort(path)? {
            out.push_str(&format!("{}{}\n", prefix, entry.path.display()));
            if entry.is_dir {
                let deeper = format!("{}{}", prefix, INDENT);
                out.push_str(&self.render_full_with_prefix(&entry.path, &deeper)?);
            }
        }
        Ok(out)
    }

    fn entries_best_effort(&self, path: &Path) -> Result<Vec<TreeEntry>> {
        match self.reader.read_entries(path) {
            Ok(entries) => Ok(entries),
            Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                debug!(
                    target: "convodesk::tree",
                    "Skipping unreadable directory {}",
                    path.display()
                );
                Ok(Vec::new())
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use tempfile::tempdir;

    /// In-memory entry source that counts enumerations.
    #[derive(Default)]
    struct StubReader {
        entries: RefCell<HashMap<PathBuf, Vec<TreeEntry>>>,
        denied: RefCell<Vec<PathBuf>>,
        calls: Cell<usize>,
    }

    impl StubReader {
        fn with_dir(self, dir: &str, children: &[(&str, bool)]) -> Self {
            self.entries.borrow_mut().insert(
                PathBuf::from(dir),
                children
                    .iter()
                    .map(|(path, is_dir)| TreeEntry {
                        path: PathBuf::from(path),
                        is_dir: *is_dir,
                    })
                    .collect(),
            );
            self
        }

        fn deny(self, dir: &str) -> Self {
            self.denied.borrow_mut().push(PathBuf::from(dir));
            self
        }
    }

    impl DirReader for &StubReader {
        fn read_entries(&self, dir: &Path) -> io::Result<Vec<TreeEntry>> {
            self.calls.set(self.calls.get() + 1);
            if self.denied.borrow().iter().any(|denied| denied == dir) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "permission denied",
                ));
            }
            Ok(self.entries.borrow().get(dir).cloned().unwrap_or_default())
        }
    }

    #[test]
    fn test_expand_is_lazy_and_idempotent() {
        let stub = StubReader::default().with_dir("/r", &[("/r/a.txt", false), ("/r/sub", true)]);
        let indexer = DirectoryIndexer::with_reader(&stub);

        let mut node = DirectoryNode::new("/r");
        assert_eq!(stub.calls.get(), 0);

        indexer.expand(&mut node).unwrap();
        let first: Vec<PathBuf> = node.children.iter().map(|c| c.path.clone()).collect();
        assert_eq!(stub.calls.get(), 1);

        indexer.expand(&mut node).unwrap();
        let second: Vec<PathBuf> = node.children.iter().map(|c| c.path.clone()).collect();
        assert_eq!(first, second);
        assert_eq!(stub.calls.get(), 1, "second expand must not enumerate");
    }

    #[test]
    fn test_expanded_empty_directory_is_not_relisted() {
        let stub = StubReader::default().with_dir("/empty", &[]);
        let indexer = DirectoryIndexer::with_reader(&stub);

        let mut node = DirectoryNode::new("/empty");
        indexer.expand(&mut node).unwrap();
        indexer.expand(&mut node).unwrap();

        assert!(node.children.is_empty());
        assert!(node.expanded);
        assert_eq!(stub.calls.get(), 1);
    }

    #[test]
    fn test_root_populates_immediate_children() {
        let stub = StubReader::default().with_dir("/r", &[("/r/a.txt", false)]);
        let indexer = DirectoryIndexer::with_reader(&stub);

        let root = indexer.root(Path::new("/r")).unwrap();
        assert!(root.expanded);
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].name, "a.txt");
        assert!(!root.children[0].expanded);
    }

    #[test]
    fn test_denied_root_lists_as_empty() {
        let stub = StubReader::default().deny("/locked");
        let indexer = DirectoryIndexer::with_reader(&stub);

        assert!(indexer.list_children(Path::new("/locked")).unwrap().is_empty());
    }

    #[test]
    fn test_render_shallow_is_one_line_per_child() {
        let stub = StubReader::default().with_dir(
            "/r",
            &[("/r/sub", true), ("/r/a.txt", false)],
        );
        let indexer = DirectoryIndexer::with_reader(&stub);

        let listing = indexer.render_shallow(Path::new("/r")).unwrap();
        assert_eq!(listing, "/r\n/r/sub\n/r/a.txt\n");
    }

    #[test]
    fn test_render_full_indents_and_reemits_directory_heads() {
        let stub = StubReader::default()
            .with_dir("/r", &[("/r/sub", true), ("/r/a.txt", false)])
            .with_dir("/r/sub", &[("/r/sub/inner.txt", false)]);
        let indexer = DirectoryIndexer::with_reader(&stub);

        let listing = indexer.render_full(Path::new("/r")).unwrap();
        assert_eq!(
            listing,
            "/r\n/r/sub\n/r/sub\n    /r/sub/inner.txt\n/r/a.txt\n"
        );
    }

    #[test]
    fn test_render_skips_denied_subtree_but_keeps_siblings() {
        let stub = StubReader::default()
            .with_dir(
                "/r",
                &[("/r/ok", true), ("/r/locked", true), ("/r/a.txt", false)],
            )
            .with_dir("/r/ok", &[("/r/ok/x.txt", false)])
            .deny("/r/locked");
        let indexer = DirectoryIndexer::with_reader(&stub);

        let shallow = indexer.render_shallow(Path::new("/r")).unwrap();
        assert_eq!(shallow, "/r\n/r/ok\n/r/locked\n/r/a.txt\n");

        let full = indexer.render_full(Path::new("/r")).unwrap();
        assert!(full.contains("    /r/ok/x.txt\n"));
        assert!(full.contains("/r/locked\n"));
        assert!(full.contains("/r/a.txt\n"));
    }

    #[test]
    fn test_fs_reader_lists_real_entries() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("file.txt"), "x").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let entries = FsDirReader.read_entries(dir.path()).unwrap();
        assert_eq!(entries.len(), 2);

        let sub = entries
            .iter()
            .find(|entry| entry.path.ends_with("sub"))
            .unwrap();
        assert!(sub.is_dir);
        let file = entries
            .iter()
            .find(|entry| entry.path.ends_with("file.txt"))
            .unwrap();
        assert!(!file.is_dir);
    }
}
