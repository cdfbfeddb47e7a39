//! Runner: wires storage, feed client, processor and polling driver,
//! then waits for ctrl-c.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, instrument};

use bridge_core::{init_tracing, PollingDriver, UpdateProcessor};
use bridge_telegram::TelegramFeedClient;
use storage::{ConversationRepository, MessageRepository, SqlitePoolManager};

use crate::config::AppConfig;
use crate::ids::UuidIdGenerator;
use crate::reply::RandomReplyProvider;

/// Main entry: validate config, init logging, build the pipeline,
/// spawn the polling driver, and stop it cooperatively on ctrl-c.
#[instrument(skip(config))]
pub async fn run_bridge(config: AppConfig) -> Result<()> {
    config.validate()?;

    if let Some(parent) = Path::new(&config.log_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    init_tracing(&config.log_file)?;

    info!(
        database_url = %config.database_url,
        poll_interval_ms = config.poll_interval_ms,
        "Initializing bridge"
    );

    let pool = SqlitePoolManager::new(&config.database_url).await?;
    let conversations = Arc::new(ConversationRepository::new(pool.clone()).await?);
    let messages = Arc::new(MessageRepository::new(pool).await?);

    let feed = Arc::new(match &config.telegram_api_url {
        Some(url) => TelegramFeedClient::with_api_url(&config.bot_token, url),
        None => TelegramFeedClient::new(&config.bot_token),
    });

    let processor = Arc::new(UpdateProcessor::new(
        conversations,
        messages,
        feed,
        Arc::new(UuidIdGenerator),
        Arc::new(RandomReplyProvider::new(config.auto_reply_phrases.clone())),
    ));

    let handle =
        PollingDriver::new(processor, Duration::from_millis(config.poll_interval_ms)).spawn();

    info!("Bridge started");

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received; stopping poller");
    handle.stop();
    handle.join().await;

    Ok(())
}
