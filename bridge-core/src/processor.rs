//! Update processor: turns one fetched batch into domain records and
//! dispatched replies.
//!
//! Per update, strictly in feed order: resolve or create the owning
//! conversation, persist the inbound message, generate a reply, send it
//! through the feed client, persist the outbound message. The processor
//! holds no cursor state of its own; it reports the highest cursor it
//! observed and leaves advancement to the [`PollingDriver`](crate::poller::PollingDriver).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, instrument};

use crate::error::Result;
use crate::ports::{ConversationStore, FeedClient, IdGenerator, MessageStore, ReplyProvider};
use crate::types::{ChatId, Conversation, Message, MessageContent, Update};

/// Outcome of processing a single update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedUpdate {
    pub conversation_id: String,
    pub update_id: i64,
}

/// Outcome of one whole fetch-and-process pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestOutcome {
    /// Number of text updates fully processed.
    pub processed: usize,
    /// Highest cursor observed in the batch (including non-text
    /// updates dropped by the feed client), if any update was seen.
    pub last_update_id: Option<i64>,
}

/// Entry point the polling driver (or an on-demand trigger) runs per
/// tick. Abstracted as a trait so driver tests can script outcomes
/// without real collaborators.
#[async_trait]
pub trait IngestRunner: Send + Sync {
    /// Fetches one batch starting at `offset` and processes it in
    /// order. Any per-update error aborts the remainder of the batch
    /// and is returned to the caller; already-persisted records from
    /// earlier updates in the batch are kept.
    async fn run_once(&self, offset: Option<i64>) -> Result<IngestOutcome>;
}

/// Processes fetched updates against the injected collaborators.
pub struct UpdateProcessor {
    conversations: Arc<dyn ConversationStore>,
    messages: Arc<dyn MessageStore>,
    feed: Arc<dyn FeedClient>,
    ids: Arc<dyn IdGenerator>,
    replies: Arc<dyn ReplyProvider>,
}

impl UpdateProcessor {
    pub fn new(
        conversations: Arc<dyn ConversationStore>,
        messages: Arc<dyn MessageStore>,
        feed: Arc<dyn FeedClient>,
        ids: Arc<dyn IdGenerator>,
        replies: Arc<dyn ReplyProvider>,
    ) -> Self {
        Self {
            conversations,
            messages,
            feed,
            ids,
            replies,
        }
    }

    /// Returns the conversation owning `chat_id`, creating and
    /// persisting it on first contact. This is the only creation path
    /// for a conversation.
    async fn resolve_conversation(&self, chat_id: &ChatId) -> Result<Conversation> {
        if let Some(existing) = self.conversations.find_by_chat_id(chat_id).await? {
            return Ok(existing);
        }

        let conversation =
            Conversation::new(self.ids.generate(), chat_id.clone(), Utc::now())?;
        self.conversations.save(&conversation).await?;
        info!(
            conversation_id = %conversation.id,
            chat_id = %chat_id,
            "Created conversation for new chat"
        );

        // The request-handling side of the process may have written the
        // same chat concurrently; the stored row wins.
        Ok(self
            .conversations
            .find_by_chat_id(chat_id)
            .await?
            .unwrap_or(conversation))
    }

    /// Processes a single update. Content is validated before any
    /// persistence call; the inbound message is kept as historical
    /// record even when the reply send fails afterwards, but the
    /// outbound message is only persisted after a successful send.
    #[instrument(skip(self, update), fields(update_id = update.update_id))]
    pub async fn process(&self, update: &Update) -> Result<ProcessedUpdate> {
        let content = MessageContent::new(&update.text)?;

        let conversation = self.resolve_conversation(&update.chat_id).await?;

        let inbound = Message::inbound(
            self.ids.generate(),
            &conversation.id,
            content,
            update.telegram_message_id,
        )?;
        self.messages.save(&inbound).await?;

        let reply = MessageContent::new(&self.replies.get_reply().await)?;
        self.feed.send(&update.chat_id, reply.as_str()).await?;

        let outbound = Message::outbound(self.ids.generate(), &conversation.id, reply)?;
        self.messages.save(&outbound).await?;

        info!(
            conversation_id = %conversation.id,
            chat_id = %update.chat_id,
            update_id = update.update_id,
            "Processed update"
        );

        Ok(ProcessedUpdate {
            conversation_id: conversation.id,
            update_id: update.update_id,
        })
    }
}

#[async_trait]
impl IngestRunner for UpdateProcessor {
    #[instrument(skip(self))]
    async fn run_once(&self, offset: Option<i64>) -> Result<IngestOutcome> {
        let batch = self.feed.fetch_updates(offset).await?;

        let mut processed = 0;
        for update in &batch.updates {
            self.process(update).await?;
            processed += 1;
        }

        Ok(IngestOutcome {
            processed,
            last_update_id: batch.last_update_id,
        })
    }
}
