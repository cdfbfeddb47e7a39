//! # bridge-core
//!
//! Core domain and ingestion logic for the Telegram admin bridge.
//! Transport (Telegram HTTP API) and persistence (SQLite) live behind
//! ports (traits) implemented in adapter crates.
//!
//! ## Modules
//!
//! - [`error`] – BridgeError taxonomy and Result alias
//! - [`types`] – Conversation, Message, Update, value objects
//! - [`ports`] – store / feed / reply / id-generator traits
//! - [`processor`] – UpdateProcessor (one batch of updates)
//! - [`poller`] – PollingDriver (cursor-owning scheduling loop)
//! - [`logger`] – tracing initialization

pub mod error;
pub mod logger;
pub mod poller;
pub mod ports;
pub mod processor;
pub mod types;

pub use error::{BridgeError, Result};
pub use logger::init_tracing;
pub use poller::{PollerHandle, PollingDriver};
pub use ports::{ConversationStore, FeedClient, IdGenerator, MessageStore, ReplyProvider};
pub use processor::{IngestOutcome, IngestRunner, ProcessedUpdate, UpdateProcessor};
pub use types::{
    ChatId, Conversation, Message, MessageContent, MessageDirection, Update, UpdateBatch,
};
