//! Storage crate: SQLite persistence for conversations and messages.
//!
//! ## Modules
//!
//! - [`models`] – ConversationRecord, MessageRecord (table rows)
//! - [`conversation_repo`] – ConversationRepository (SQLite)
//! - [`message_repo`] – MessageRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager
//!
//! The repositories implement the `bridge-core` store ports; rows are
//! converted to domain entities at this boundary and database failures
//! are mapped to `BridgeError::Persistence`.

mod conversation_repo;
mod message_repo;
mod models;
mod sqlite_pool;

pub use conversation_repo::ConversationRepository;
pub use message_repo::MessageRepository;
pub use models::{ConversationRecord, MessageRecord};
pub use sqlite_pool::SqlitePoolManager;
