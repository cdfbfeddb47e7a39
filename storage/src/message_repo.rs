//! Message repository: persistence and per-conversation listing.
//!
//! Uses SqlitePoolManager and MessageRecord. Listing returns oldest
//! first; ties on created_at fall back to insertion order (rowid).

use async_trait::async_trait;
use bridge_core::{BridgeError, Message, MessageStore};
use tracing::info;

use crate::models::MessageRecord;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct MessageRepository {
    pool_manager: SqlitePoolManager,
}

impl MessageRepository {
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, sqlx::Error> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating messages table if not exists");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id TEXT PRIMARY KEY,
                conversation_id TEXT NOT NULL,
                content TEXT NOT NULL,
                direction TEXT NOT NULL,
                created_at TEXT NOT NULL,
                telegram_message_id INTEGER
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_messages_conversation_id ON messages(conversation_id);
            CREATE INDEX IF NOT EXISTS idx_messages_created_at ON messages(created_at);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn insert(&self, record: &MessageRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, conversation_id, content, direction, created_at, telegram_message_id)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.conversation_id)
        .bind(&record.content)
        .bind(&record.direction)
        .bind(record.created_at)
        .bind(record.telegram_message_id)
        .execute(self.pool_manager.pool())
        .await?;

        info!(
            message_id = %record.id,
            conversation_id = %record.conversation_id,
            direction = %record.direction,
            "Saved message"
        );
        Ok(())
    }

    pub async fn get_by_conversation(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<MessageRecord>, sqlx::Error> {
        sqlx::query_as::<_, MessageRecord>(
            "SELECT * FROM messages WHERE conversation_id = ? ORDER BY created_at ASC, rowid ASC",
        )
        .bind(conversation_id)
        .fetch_all(self.pool_manager.pool())
        .await
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    async fn save(&self, message: &Message) -> bridge_core::Result<()> {
        self.insert(&MessageRecord::from(message))
            .await
            .map_err(|e| BridgeError::Persistence(e.to_string()))
    }

    async fn find_by_conversation(
        &self,
        conversation_id: &str,
    ) -> bridge_core::Result<Vec<Message>> {
        self.get_by_conversation(conversation_id)
            .await
            .map_err(|e| BridgeError::Persistence(e.to_string()))?
            .into_iter()
            .map(Message::try_from)
            .collect()
    }
}
