//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "bridge")]
#[command(about = "Telegram admin bridge: polls updates, persists conversations, auto-replies", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bridge (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
}

/// Load AppConfig from environment. If `token` is provided it overrides
/// BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<AppConfig> {
    AppConfig::load(token)
}
