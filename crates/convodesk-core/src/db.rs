//! SQLite persistence for conversations.

use crate::Result;
use chrono::Local;
use convodesk_types::ConversationRecord;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, warn};

/// SQLite-backed conversation store.
///
/// The connection is owned here, opened once and closed through
/// [`ConversationDb::close`].
pub struct ConversationDb {
    conn: Mutex<Connection>,
}

impl ConversationDb {
    /// Open or create the database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create a store from an existing connection (e.g. in-memory for tests).
    pub fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Initialize database schema.
    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS conversations (
                id TEXT PRIMARY KEY,
                user_question TEXT,
                assistant_answer TEXT,
                timestamp TEXT
            );
            "#,
        )?;
        Ok(())
    }

    /// Insert or replace the row for a conversation id.
    pub fn upsert(&self, id: &str, question: &str, answer: &str, timestamp: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT OR REPLACE INTO conversations (id, user_question, assistant_answer, timestamp)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![id, question, answer, timestamp],
        )?;
        info!(target: "convodesk::db", "Conversation {} saved to database", id);
        Ok(())
    }

    /// Get a conversation row by id.
    pub fn get(&self, id: &str) -> Result<Option<ConversationRecord>> {
        let conn = self.conn.lock().unwrap();
        let record = conn
            .query_row(
                r#"
                SELECT id, user_question, assistant_answer, timestamp
                FROM conversations WHERE id = ?1
                "#,
                params![id],
                |row| {
                    Ok(ConversationRecord {
                        id: row.get(0)?,
                        question: row.get(1)?,
                        answer: row.get(2)?,
                        timestamp: row.get(3)?,
                    })
                },
            )
            .optional()?;
        if record.is_none() {
            warn!(target: "convodesk::db", "Conversation {} not found in database", id);
        }
        Ok(record)
    }

    /// Close the underlying connection.
    pub fn close(self) -> Result<()> {
        let conn = self.conn.into_inner().unwrap();
        conn.close().map_err(|(_, err)| err.into())
    }

    #[cfg(test)]
    fn count(&self) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count = conn.query_row("SELECT COUNT(*) FROM conversations", [], |row| row.get(0))?;
        Ok(count)
    }
}

/// Current local time in the relational store's timestamp format.
pub fn now_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
