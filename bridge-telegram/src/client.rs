//! Telegram Bot API client: getUpdates + sendMessage.
//!
//! Note: Telegram reports an invalid bot token as 404 (not 401), so
//! both are mapped to [`BridgeError::Auth`].

use async_trait::async_trait;
use bridge_core::{BridgeError, ChatId, FeedClient, Result, Update, UpdateBatch};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Long-poll window passed to getUpdates, in seconds.
const FETCH_TIMEOUT_SECS: u64 = 30;

/// Feed client over the Telegram Bot HTTP API.
pub struct TelegramFeedClient {
    http: reqwest::Client,
    base_url: String,
    bot_token: String,
}

impl TelegramFeedClient {
    /// Creates a client against the public Telegram API.
    pub fn new(bot_token: &str) -> Self {
        Self::with_api_url(bot_token, TELEGRAM_API_BASE)
    }

    /// Creates a client against a custom API base URL (tests,
    /// self-hosted bot API).
    pub fn with_api_url(bot_token: &str, base_url: &str) -> Self {
        // Tokens pasted with stray whitespace are a recurring support
        // issue; strip it here like the config layer does.
        let bot_token: String = bot_token.chars().filter(|c| !c.is_whitespace()).collect();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bot_token,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.bot_token, method)
    }

    fn classify_status(status: StatusCode, method: &str, body: &str) -> BridgeError {
        if status == StatusCode::NOT_FOUND || status == StatusCode::UNAUTHORIZED {
            BridgeError::Auth(format!(
                "Telegram API {}: bot token rejected (check BOT_TOKEN): {}",
                status.as_u16(),
                body
            ))
        } else {
            BridgeError::Transport(format!(
                "Telegram API {} failed: {} {}",
                method,
                status.as_u16(),
                body
            ))
        }
    }
}

#[async_trait]
impl FeedClient for TelegramFeedClient {
    async fn fetch_updates(&self, offset: Option<i64>) -> Result<UpdateBatch> {
        let mut request = self
            .http
            .get(self.method_url("getUpdates"))
            .query(&[("timeout", FETCH_TIMEOUT_SECS.to_string())]);
        if let Some(offset) = offset {
            request = request.query(&[("offset", offset.to_string())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BridgeError::Transport(format!("getUpdates request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status, "getUpdates", &body));
        }

        let payload: GetUpdatesResponse = response
            .json()
            .await
            .map_err(|e| BridgeError::Transport(format!("getUpdates parse failed: {}", e)))?;

        if !payload.ok {
            warn!("getUpdates returned ok=false; treating as empty batch");
            return Ok(UpdateBatch::default());
        }

        normalize(payload.result)
    }

    async fn send(&self, chat_id: &ChatId, text: &str) -> Result<()> {
        let response = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&SendMessageRequest {
                chat_id: chat_id.as_str(),
                text,
            })
            .send()
            .await
            .map_err(|e| BridgeError::Transport(format!("sendMessage request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status, "sendMessage", &body));
        }

        debug!(chat_id = %chat_id, "Sent message");
        Ok(())
    }
}

/// Normalizes raw updates, keeping feed order. Non-text updates are
/// dropped but still move `last_update_id` forward — otherwise the
/// cursor would stall and the same unusable updates would be fetched
/// forever.
fn normalize(raw_updates: Vec<RawUpdate>) -> Result<UpdateBatch> {
    let mut batch = UpdateBatch::default();

    for raw in raw_updates {
        batch.last_update_id = Some(
            batch
                .last_update_id
                .map_or(raw.update_id, |last| last.max(raw.update_id)),
        );

        let Some(message) = raw.message else {
            continue;
        };
        let Some(text) = message.text else {
            debug!(update_id = raw.update_id, "Skipping non-text update");
            continue;
        };

        batch.updates.push(Update {
            update_id: raw.update_id,
            chat_id: ChatId::new(message.chat.id.to_string())?,
            text,
            telegram_message_id: message.message_id,
            from_username: message.from.and_then(|f| f.username),
        });
    }

    Ok(batch)
}

#[derive(Debug, Deserialize)]
struct GetUpdatesResponse {
    ok: bool,
    #[serde(default)]
    result: Vec<RawUpdate>,
}

#[derive(Debug, Deserialize)]
struct RawUpdate {
    update_id: i64,
    message: Option<RawMessage>,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    message_id: i64,
    chat: RawChat,
    text: Option<String>,
    from: Option<RawUser>,
}

#[derive(Debug, Deserialize)]
struct RawChat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    username: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}
