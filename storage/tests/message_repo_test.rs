//! Integration tests for [`storage::MessageRepository`] against a
//! temp-file SQLite database.

use bridge_core::{Message, MessageContent, MessageDirection, MessageStore};
use chrono::{Duration, Utc};
use storage::{MessageRepository, SqlitePoolManager};
use tempfile::TempDir;

async fn setup() -> (TempDir, MessageRepository) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let database_url = format!("sqlite:{}/bridge.db", dir.path().display());
    let pool = SqlitePoolManager::new(&database_url)
        .await
        .expect("Failed to create pool");
    let repo = MessageRepository::new(pool)
        .await
        .expect("Failed to create repository");
    (dir, repo)
}

/// **Test: inbound message round-trips with its telegram message id.**
#[tokio::test]
async fn save_and_load_inbound_message() {
    let (_dir, repo) = setup().await;

    let message = Message::inbound(
        "m-1".to_string(),
        "c-1",
        MessageContent::new("hola").unwrap(),
        900,
    )
    .unwrap();
    repo.save(&message).await.expect("Failed to save");

    let loaded = repo.find_by_conversation("c-1").await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, "m-1");
    assert_eq!(loaded[0].content.as_str(), "hola");
    assert_eq!(loaded[0].direction, MessageDirection::Inbound);
    assert_eq!(loaded[0].telegram_message_id, Some(900));
}

/// **Test: outbound messages store no telegram message id.**
#[tokio::test]
async fn outbound_message_has_no_external_id() {
    let (_dir, repo) = setup().await;

    let message =
        Message::outbound("m-1".to_string(), "c-1", MessageContent::new("Hola!").unwrap())
            .unwrap();
    repo.save(&message).await.unwrap();

    let loaded = repo.find_by_conversation("c-1").await.unwrap();
    assert_eq!(loaded[0].direction, MessageDirection::Outbound);
    assert_eq!(loaded[0].telegram_message_id, None);
}

/// **Test: listing returns the conversation's messages oldest first
/// and ignores other conversations.**
///
/// **Setup:** Three messages with distinct timestamps saved out of
/// order, plus one message in another conversation.
#[tokio::test]
async fn find_by_conversation_orders_oldest_first() {
    let (_dir, repo) = setup().await;

    let base = Utc::now();
    let mut second = Message::inbound(
        "m-2".to_string(),
        "c-1",
        MessageContent::new("second").unwrap(),
        2,
    )
    .unwrap();
    second.created_at = base + Duration::seconds(1);
    let mut first = Message::inbound(
        "m-1".to_string(),
        "c-1",
        MessageContent::new("first").unwrap(),
        1,
    )
    .unwrap();
    first.created_at = base;
    let mut third =
        Message::outbound("m-3".to_string(), "c-1", MessageContent::new("third").unwrap())
            .unwrap();
    third.created_at = base + Duration::seconds(2);
    let mut other = Message::inbound(
        "m-9".to_string(),
        "c-2",
        MessageContent::new("elsewhere").unwrap(),
        9,
    )
    .unwrap();
    other.created_at = base;

    repo.save(&second).await.unwrap();
    repo.save(&third).await.unwrap();
    repo.save(&first).await.unwrap();
    repo.save(&other).await.unwrap();

    let loaded = repo.find_by_conversation("c-1").await.unwrap();
    let ids: Vec<_> = loaded.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m-1", "m-2", "m-3"]);
}

/// **Test: unknown conversation yields an empty list.**
#[tokio::test]
async fn unknown_conversation_yields_empty_list() {
    let (_dir, repo) = setup().await;

    let loaded = repo.find_by_conversation("missing").await.unwrap();
    assert!(loaded.is_empty());
}
