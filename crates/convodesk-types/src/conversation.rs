//! Conversation data shared by the file and relational stores.

use serde::{Deserialize, Serialize};

/// A question/answer pair identified by a caller-supplied key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Caller-supplied unique key, shared by both stores.
    pub id: String,
    /// The user's question.
    pub question: String,
    /// The assistant's answer.
    pub answer: String,
}

/// One row of the relational store.
///
/// The timestamp exists only here; the file store never records one, and
/// reads do not surface it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: String,
    pub question: String,
    pub answer: String,
    /// Creation time, formatted `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}

impl From<ConversationRecord> for Conversation {
    fn from(record: ConversationRecord) -> Self {
        Self {
            id: record.id,
            question: record.question,
            answer: record.answer,
        }
    }
}
