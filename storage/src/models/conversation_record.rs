//! Conversation row model.
//!
//! Maps to the `conversations` table and is converted to/from the
//! domain entity at the repository boundary.

use bridge_core::{BridgeError, ChatId, Conversation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ConversationRecord {
    pub id: String,
    pub telegram_chat_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Conversation> for ConversationRecord {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id.clone(),
            telegram_chat_id: conversation.chat_id.to_string(),
            created_at: conversation.created_at,
        }
    }
}

impl TryFrom<ConversationRecord> for Conversation {
    type Error = BridgeError;

    fn try_from(record: ConversationRecord) -> Result<Self, Self::Error> {
        Conversation::new(
            record.id,
            ChatId::new(record.telegram_chat_id)?,
            record.created_at,
        )
    }
}
