//! Dual-store conversation persistence with read-through fallback.

use crate::db::{now_timestamp, ConversationDb};
use crate::file_store::FileStore;
use crate::{summary, transcript, ConvodeskError, Result};
use convodesk_types::Conversation;
use std::path::{Path, PathBuf};

/// Owns the flat-file store and the relational store, kept in sync on write
/// and consulted in fallback order on read.
pub struct ConversationManager {
    files: FileStore,
    db: ConversationDb,
}

impl ConversationManager {
    /// Open both stores: the flat-file log under `log_dir` and the SQLite
    /// database at `db_path`.
    pub fn open(log_dir: impl Into<PathBuf>, db_path: &Path) -> Result<Self> {
        Ok(Self {
            files: FileStore::new(log_dir)?,
            db: ConversationDb::open(db_path)?,
        })
    }

    /// Build a manager from already-opened stores.
    pub fn with_stores(files: FileStore, db: ConversationDb) -> Self {
        Self { files, db }
    }

    /// Write the conversation to both stores.
    ///
    /// The two writes are independent: if one fails after the other
    /// succeeded, the stores diverge and no rollback is attempted.
    pub fn save(&self, id: &str, question: &str, answer: &str) -> Result<()> {
        let rendered = transcript::render(question, answer);
        self.files.write(id, &rendered)?;
        self.db.upsert(id, question, answer, &now_timestamp())?;
        Ok(())
    }

    /// Load by id: file store first, relational store as fallback.
    ///
    /// Returns `None` when neither store has the id; the row's timestamp is
    /// not surfaced.
    pub fn load(&self, id: &str) -> Result<Option<Conversation>> {
        let path = self.files.path_for(id);
        if let Some(text) = self.files.read(&path)? {
            let (question, answer) =
                transcript::parse(&text).ok_or(ConvodeskError::MalformedContent(path))?;
            return Ok(Some(Conversation {
                id: id.to_string(),
                question,
                answer,
            }));
        }
        Ok(self.db.get(id)?.map(Conversation::from))
    }

    /// Load from an arbitrary transcript file instead of an id.
    ///
    /// The file stem stands in for the id. Returns `None` when the file is
    /// missing; content that does not split into two parseable lines is a
    /// [`ConvodeskError::MalformedContent`] error.
    pub fn load_from_path(&self, path: &Path) -> Result<Option<Conversation>> {
        let Some(text) = self.files.read(path)? else {
            return Ok(None);
        };
        let (question, answer) = transcript::parse(&text)
            .ok_or_else(|| ConvodeskError::MalformedContent(path.to_path_buf()))?;
        let id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Some(Conversation {
            id,
            question,
            answer,
        }))
    }

    /// Summarize the conversation for an id; `None` when the id is unknown.
    pub fn summarize(&self, id: &str) -> Result<Option<String>> {
        let Some(conversation) = self.load(id)? else {
            return Ok(None);
        };
        let rendered = transcript::render(&conversation.question, &conversation.answer);
        Ok(Some(summary::summarize(&rendered)))
    }

    /// Reassign the file store's base directory for subsequent saves and
    /// loads. Previously saved files stay where they are.
    pub fn set_storage_location(&mut self, new_dir: impl Into<PathBuf>) -> Result<()> {
        self.files.set_dir(new_dir)
    }

    /// The deterministic file path the file store uses for an id.
    pub fn file_path_for(&self, id: &str) -> PathBuf {
        self.files.path_for(id)
    }

    /// Close the relational connection.
    pub fn shutdown(self) -> Result<()> {
        self.db.close()
    }
}
