//! Ports consumed by the ingestion pipeline. Implemented by the
//! `storage` (SQLite) and `bridge-telegram` (HTTP) adapter crates, and
//! by in-memory fakes in tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ChatId, Conversation, Message, UpdateBatch};

/// Durable storage for conversations, keyed by internal id and by
/// external chat id (unique).
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Persists a conversation. Saving a second conversation for an
    /// already-known chat id must be a no-op, not a duplicate row.
    async fn save(&self, conversation: &Conversation) -> Result<()>;
    async fn find_by_chat_id(&self, chat_id: &ChatId) -> Result<Option<Conversation>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Conversation>>;
}

/// Durable storage for messages.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn save(&self, message: &Message) -> Result<()>;
    /// Messages of one conversation, oldest first.
    async fn find_by_conversation(&self, conversation_id: &str) -> Result<Vec<Message>>;
}

/// Cursor-tracked client for the external feed.
#[async_trait]
pub trait FeedClient: Send + Sync {
    /// Fetches pending updates. `offset` is the first update id the
    /// feed should return; everything below it has already been
    /// handled. `None` means "everything currently pending".
    ///
    /// The returned batch preserves the feed's ascending-cursor order
    /// and surfaces the highest cursor seen even for updates dropped
    /// during normalization (see [`UpdateBatch`]).
    async fn fetch_updates(&self, offset: Option<i64>) -> Result<UpdateBatch>;

    /// Sends a text message to the given chat. Fails with
    /// [`BridgeError::Auth`](crate::BridgeError::Auth) when the
    /// transport reports a credential problem, otherwise with
    /// [`BridgeError::Transport`](crate::BridgeError::Transport).
    async fn send(&self, chat_id: &ChatId, text: &str) -> Result<()>;
}

/// Generates opaque unique ids for new entities.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Produces the auto-reply text for an inbound message.
#[async_trait]
pub trait ReplyProvider: Send + Sync {
    async fn get_reply(&self) -> String;
}
