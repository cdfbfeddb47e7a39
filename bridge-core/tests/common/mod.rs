//! In-memory fakes for the ingestion pipeline collaborators.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bridge_core::{
    BridgeError, ChatId, Conversation, ConversationStore, FeedClient, IdGenerator, Message,
    MessageStore, ReplyProvider, Result, Update, UpdateBatch,
};

/// Conversation store over a Vec; save is a no-op for known chat ids,
/// mirroring the SQLite unique-key upsert.
#[derive(Default)]
pub struct InMemoryConversationStore {
    rows: Mutex<Vec<Conversation>>,
}

impl InMemoryConversationStore {
    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn save(&self, conversation: &Conversation) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().all(|c| c.chat_id != conversation.chat_id) {
            rows.push(conversation.clone());
        }
        Ok(())
    }

    async fn find_by_chat_id(&self, chat_id: &ChatId) -> Result<Option<Conversation>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|c| &c.chat_id == chat_id).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Conversation>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|c| c.id == id).cloned())
    }
}

/// Message store over a Vec, with a poison switch to simulate a failing
/// database write.
#[derive(Default)]
pub struct InMemoryMessageStore {
    rows: Mutex<Vec<Message>>,
    poisoned: AtomicBool,
}

impl InMemoryMessageStore {
    pub fn poison(&self) {
        self.poisoned.store(true, Ordering::SeqCst);
    }

    pub fn all(&self) -> Vec<Message> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn save(&self, message: &Message) -> Result<()> {
        if self.poisoned.load(Ordering::SeqCst) {
            return Err(BridgeError::Persistence("store poisoned".into()));
        }
        self.rows.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn find_by_conversation(&self, conversation_id: &str) -> Result<Vec<Message>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect())
    }
}

/// Feed fake: scripted fetch batches, recorded offsets and sends, and
/// an optional 1-based send call index that fails with a transport
/// error.
#[derive(Default)]
pub struct ScriptedFeed {
    batches: Mutex<VecDeque<UpdateBatch>>,
    pub offsets: Mutex<Vec<Option<i64>>>,
    sent: Mutex<Vec<(String, String)>>,
    send_calls: AtomicU64,
    fail_send_on_call: Mutex<Option<u64>>,
}

impl ScriptedFeed {
    pub fn with_batches(batches: Vec<UpdateBatch>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
            ..Self::default()
        }
    }

    pub fn fail_send_on_call(&self, call: u64) {
        *self.fail_send_on_call.lock().unwrap() = Some(call);
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedClient for ScriptedFeed {
    async fn fetch_updates(&self, offset: Option<i64>) -> Result<UpdateBatch> {
        self.offsets.lock().unwrap().push(offset);
        Ok(self
            .batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }

    async fn send(&self, chat_id: &ChatId, text: &str) -> Result<()> {
        let call = self.send_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if *self.fail_send_on_call.lock().unwrap() == Some(call) {
            return Err(BridgeError::Transport("send refused".into()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((chat_id.to_string(), text.to_string()));
        Ok(())
    }
}

/// Sequential ids: "id-1", "id-2", ...
#[derive(Default)]
pub struct SeqIdGenerator(AtomicU64);

impl IdGenerator for SeqIdGenerator {
    fn generate(&self) -> String {
        format!("id-{}", self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Always replies with the same phrase.
pub struct FixedReply(pub String);

#[async_trait]
impl ReplyProvider for FixedReply {
    async fn get_reply(&self) -> String {
        self.0.clone()
    }
}

pub fn update(update_id: i64, chat_id: &str, text: &str, telegram_message_id: i64) -> Update {
    Update {
        update_id,
        chat_id: ChatId::new(chat_id).unwrap(),
        text: text.to_string(),
        telegram_message_id,
        from_username: None,
    }
}

/// Batch whose last cursor is the highest update id it contains.
pub fn batch(updates: Vec<Update>) -> UpdateBatch {
    let last_update_id = updates.iter().map(|u| u.update_id).max();
    UpdateBatch {
        updates,
        last_update_id,
    }
}
