//! Core types: conversation, message, value objects, and the transient
//! update records produced by the feed client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// Telegram caps a text message at 4096 characters; content beyond that
/// is rejected before it can reach storage.
pub const MAX_CONTENT_LEN: usize = 4096;

/// External chat identity. Telegram uses numbers (positive or negative)
/// but transports them as text, so the value is kept as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(String);

impl ChatId {
    /// Creates a chat id from a non-empty string.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(BridgeError::Validation("chat id must not be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated message body: trimmed, non-empty, at most
/// [`MAX_CONTENT_LEN`] characters. Invalid content never reaches
/// storage because it cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(BridgeError::Validation(
                "message content must not be empty".into(),
            ));
        }
        if trimmed.chars().count() > MAX_CONTENT_LEN {
            return Err(BridgeError::Validation(format!(
                "message content exceeds {} characters",
                MAX_CONTENT_LEN
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Direction of a message ("in" = received from Telegram, "out" = sent
/// by the system).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageDirection {
    Inbound,
    Outbound,
}

impl MessageDirection {
    /// Storage representation ("in" / "out").
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageDirection::Inbound => "in",
            MessageDirection::Outbound => "out",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "in" => Ok(MessageDirection::Inbound),
            "out" => Ok(MessageDirection::Outbound),
            other => Err(BridgeError::Validation(format!(
                "unknown message direction: {}",
                other
            ))),
        }
    }
}

/// Durable record of an ongoing exchange with one external chat.
/// Exactly one conversation exists per distinct chat id; created on
/// first contact and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub chat_id: ChatId,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(id: String, chat_id: ChatId, created_at: DateTime<Utc>) -> Result<Self> {
        if id.trim().is_empty() {
            return Err(BridgeError::Validation(
                "conversation id must not be empty".into(),
            ));
        }
        Ok(Self {
            id,
            chat_id,
            created_at,
        })
    }
}

/// A message within a conversation. `telegram_message_id` is only set
/// for inbound messages sourced from the feed (traceability, not a
/// uniqueness constraint).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub content: MessageContent,
    pub direction: MessageDirection,
    pub created_at: DateTime<Utc>,
    pub telegram_message_id: Option<i64>,
}

impl Message {
    /// An inbound message received from the feed.
    pub fn inbound(
        id: String,
        conversation_id: &str,
        content: MessageContent,
        telegram_message_id: i64,
    ) -> Result<Self> {
        Self::build(
            id,
            conversation_id,
            content,
            MessageDirection::Inbound,
            Some(telegram_message_id),
        )
    }

    /// An outbound message sent by the system (no external id).
    pub fn outbound(id: String, conversation_id: &str, content: MessageContent) -> Result<Self> {
        Self::build(id, conversation_id, content, MessageDirection::Outbound, None)
    }

    fn build(
        id: String,
        conversation_id: &str,
        content: MessageContent,
        direction: MessageDirection,
        telegram_message_id: Option<i64>,
    ) -> Result<Self> {
        if id.trim().is_empty() {
            return Err(BridgeError::Validation("message id must not be empty".into()));
        }
        if conversation_id.trim().is_empty() {
            return Err(BridgeError::Validation(
                "message conversation id must not be empty".into(),
            ));
        }
        Ok(Self {
            id,
            conversation_id: conversation_id.to_string(),
            content,
            direction,
            created_at: Utc::now(),
            telegram_message_id,
        })
    }
}

/// One normalized inbound event from the feed. Transient: consumed
/// exactly once by the processor, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    /// Monotonically increasing cursor assigned by the feed.
    pub update_id: i64,
    pub chat_id: ChatId,
    pub text: String,
    pub telegram_message_id: i64,
    pub from_username: Option<String>,
}

/// One fetch result. `last_update_id` is the highest cursor observed
/// across *all* raw updates, including non-text ones that were dropped
/// during normalization — otherwise the cursor would stall forever on
/// non-text noise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateBatch {
    pub updates: Vec<Update>,
    pub last_update_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_id_accepts_negative_numeric_strings() {
        let id = ChatId::new("-100987654321").unwrap();
        assert_eq!(id.as_str(), "-100987654321");
    }

    #[test]
    fn chat_id_rejects_empty_and_blank() {
        assert!(ChatId::new("").is_err());
        assert!(ChatId::new("   ").is_err());
    }

    #[test]
    fn content_trims_and_keeps_value() {
        let content = MessageContent::new("  hola  ").unwrap();
        assert_eq!(content.as_str(), "hola");
    }

    #[test]
    fn content_rejects_empty() {
        assert!(matches!(
            MessageContent::new("   "),
            Err(BridgeError::Validation(_))
        ));
    }

    #[test]
    fn content_rejects_over_length() {
        let long = "x".repeat(MAX_CONTENT_LEN + 1);
        assert!(MessageContent::new(&long).is_err());

        let max = "x".repeat(MAX_CONTENT_LEN);
        assert!(MessageContent::new(&max).is_ok());
    }

    #[test]
    fn direction_round_trips_through_storage_form() {
        assert_eq!(MessageDirection::Inbound.as_str(), "in");
        assert_eq!(
            MessageDirection::parse("out").unwrap(),
            MessageDirection::Outbound
        );
        assert!(MessageDirection::parse("sideways").is_err());
    }

    #[test]
    fn outbound_message_carries_no_external_id() {
        let content = MessageContent::new("ok").unwrap();
        let message = Message::outbound("m1".into(), "c1", content).unwrap();
        assert_eq!(message.direction, MessageDirection::Outbound);
        assert!(message.telegram_message_id.is_none());
    }

    #[test]
    fn message_rejects_blank_ids() {
        let content = MessageContent::new("ok").unwrap();
        assert!(Message::outbound(" ".into(), "c1", content.clone()).is_err());
        assert!(Message::outbound("m1".into(), "", content).is_err());
    }
}
