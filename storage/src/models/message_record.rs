//! Message row model.
//!
//! Maps to the `messages` table; direction is stored as "in" / "out".

use bridge_core::{BridgeError, Message, MessageContent, MessageDirection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageRecord {
    pub id: String,
    pub conversation_id: String,
    pub content: String,
    pub direction: String,
    pub created_at: DateTime<Utc>,
    pub telegram_message_id: Option<i64>,
}

impl From<&Message> for MessageRecord {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.clone(),
            conversation_id: message.conversation_id.clone(),
            content: message.content.as_str().to_string(),
            direction: message.direction.as_str().to_string(),
            created_at: message.created_at,
            telegram_message_id: message.telegram_message_id,
        }
    }
}

impl TryFrom<MessageRecord> for Message {
    type Error = BridgeError;

    fn try_from(record: MessageRecord) -> Result<Self, Self::Error> {
        Ok(Message {
            id: record.id,
            conversation_id: record.conversation_id,
            content: MessageContent::new(&record.content)?,
            direction: MessageDirection::parse(&record.direction)?,
            created_at: record.created_at,
            telegram_message_id: record.telegram_message_id,
        })
    }
}
