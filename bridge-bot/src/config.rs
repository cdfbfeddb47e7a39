//! App config: Telegram connection, polling, auto-reply, logging,
//! database. Loaded from env.

use anyhow::Result;
use std::env;

/// Default phrase set used when AUTO_REPLY_PHRASES is not configured.
const DEFAULT_PHRASES: &str = "Hola!,¿En qué puedo ayudarte?";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// BOT_TOKEN (whitespace stripped; a pasted token with stray spaces
    /// is a recurring support issue)
    pub bot_token: String,
    /// TELEGRAM_API_URL; override for tests or a self-hosted bot API
    pub telegram_api_url: Option<String>,
    /// Conversation/message database URL (SQLite)
    pub database_url: String,
    /// Log file path
    pub log_file: String,
    /// TELEGRAM_POLL_INTERVAL_MS; delay between polling ticks
    pub poll_interval_ms: u64,
    /// AUTO_REPLY_PHRASES, comma-separated
    pub auto_reply_phrases: Vec<String>,
}

impl AppConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if
    /// provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = token
            .or_else(|| env::var("BOT_TOKEN").ok())
            .unwrap_or_default();
        let bot_token: String = bot_token.chars().filter(|c| !c.is_whitespace()).collect();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:bridge.db".to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/bridge.log".to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL").ok();
        let poll_interval_ms = env::var("TELEGRAM_POLL_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);
        let phrases = env::var("AUTO_REPLY_PHRASES").unwrap_or_else(|_| DEFAULT_PHRASES.into());
        let auto_reply_phrases = phrases
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            bot_token,
            telegram_api_url,
            database_url,
            log_file,
            poll_interval_ms,
            auto_reply_phrases,
        })
    }

    /// Validate config: token present, interval sane, api url parseable
    /// if set.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.is_empty() {
            anyhow::bail!(
                "BOT_TOKEN not set. Configure BOT_TOKEN in .env with the token from @BotFather."
            );
        }
        if self.poll_interval_ms == 0 {
            anyhow::bail!("TELEGRAM_POLL_INTERVAL_MS must be greater than zero");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!("TELEGRAM_API_URL is set but not a valid URL: {}", url_str);
            }
        }
        Ok(())
    }
}
