//! # bridge-telegram
//!
//! Feed client adapter for the Telegram Bot HTTP API. Implements the
//! `bridge-core` [`FeedClient`](bridge_core::FeedClient) port with
//! pull-based `getUpdates` polling and `sendMessage` dispatch.

mod client;

pub use client::TelegramFeedClient;
