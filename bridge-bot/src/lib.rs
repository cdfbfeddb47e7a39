//! # bridge-bot
//!
//! Binary crate for the Telegram admin bridge: CLI, env config, id and
//! reply adapters, and the runner wiring storage + feed client +
//! processor + polling driver together.

pub mod cli;
pub mod config;
pub mod ids;
pub mod reply;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use config::AppConfig;
pub use ids::UuidIdGenerator;
pub use reply::RandomReplyProvider;
pub use runner::run_bridge;
