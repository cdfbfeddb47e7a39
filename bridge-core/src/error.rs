use thiserror::Error;

/// Error taxonomy for the ingestion pipeline.
///
/// Adapter crates map their specific errors (HTTP, SQL) into these
/// variants at the boundary so the driver can tell retryable failures
/// (`Transport`, `Persistence`) from operator-actionable ones (`Auth`)
/// and permanently unprocessable input (`Validation`).
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
