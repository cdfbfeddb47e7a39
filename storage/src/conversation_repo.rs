//! Conversation repository: one row per external chat.
//!
//! Uses SqlitePoolManager and ConversationRecord. The unique index on
//! `telegram_chat_id` plus `ON CONFLICT DO NOTHING` makes `save`
//! idempotent per chat, also against the request-handling side of the
//! process writing concurrently.

use async_trait::async_trait;
use bridge_core::{BridgeError, ChatId, Conversation, ConversationStore};
use tracing::info;

use crate::models::ConversationRecord;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct ConversationRepository {
    pool_manager: SqlitePoolManager,
}

impl ConversationRepository {
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, sqlx::Error> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating conversations table if not exists");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS conversations (
                id TEXT PRIMARY KEY,
                telegram_chat_id TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;

        Ok(())
    }

    /// Inserts a conversation; a row for the same chat id already in
    /// place wins and the insert is a no-op.
    pub async fn insert(&self, record: &ConversationRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO conversations (id, telegram_chat_id, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT(telegram_chat_id) DO NOTHING
            "#,
        )
        .bind(&record.id)
        .bind(&record.telegram_chat_id)
        .bind(record.created_at)
        .execute(self.pool_manager.pool())
        .await?;

        Ok(())
    }

    pub async fn get_by_chat_id(
        &self,
        telegram_chat_id: &str,
    ) -> Result<Option<ConversationRecord>, sqlx::Error> {
        sqlx::query_as::<_, ConversationRecord>(
            "SELECT * FROM conversations WHERE telegram_chat_id = ?",
        )
        .bind(telegram_chat_id)
        .fetch_optional(self.pool_manager.pool())
        .await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<ConversationRecord>, sqlx::Error> {
        sqlx::query_as::<_, ConversationRecord>("SELECT * FROM conversations WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool_manager.pool())
            .await
    }
}

#[async_trait]
impl ConversationStore for ConversationRepository {
    async fn save(&self, conversation: &Conversation) -> bridge_core::Result<()> {
        self.insert(&ConversationRecord::from(conversation))
            .await
            .map_err(|e| BridgeError::Persistence(e.to_string()))
    }

    async fn find_by_chat_id(
        &self,
        chat_id: &ChatId,
    ) -> bridge_core::Result<Option<Conversation>> {
        self.get_by_chat_id(chat_id.as_str())
            .await
            .map_err(|e| BridgeError::Persistence(e.to_string()))?
            .map(Conversation::try_from)
            .transpose()
    }

    async fn find_by_id(&self, id: &str) -> bridge_core::Result<Option<Conversation>> {
        self.get_by_id(id)
            .await
            .map_err(|e| BridgeError::Persistence(e.to_string()))?
            .map(Conversation::try_from)
            .transpose()
    }
}
