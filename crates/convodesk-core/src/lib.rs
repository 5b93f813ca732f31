//! Conversation persistence and directory tree indexing for convodesk.
//!
//! Two independent components live here: [`ConversationManager`], which keeps
//! a flat-file log and a SQLite table in sync and reads them in fallback
//! order, and [`DirectoryIndexer`], which materializes a filesystem subtree
//! lazily and serializes it to plain-text listings.

mod db;
mod error;
mod file_store;
mod manager;
mod summary;
pub mod transcript;
mod tree;

pub use db::{now_timestamp, ConversationDb};
pub use error::ConvodeskError;
pub use file_store::FileStore;
pub use manager::ConversationManager;
pub use summary::summarize;
pub use tree::{DirReader, DirectoryIndexer, FsDirReader, TreeEntry};

/// Result type for convodesk operations.
pub type Result<T> = std::result::Result<T, ConvodeskError>;
