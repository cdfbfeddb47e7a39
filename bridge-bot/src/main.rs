//! Binary for the Telegram admin bridge: pull-based update ingestion
//! with persistence and auto-replies.

use anyhow::Result;
use clap::Parser;

use bridge_bot::cli::{load_config, Cli, Commands};
use bridge_bot::run_bridge;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bridge(config).await
        }
    }
}
