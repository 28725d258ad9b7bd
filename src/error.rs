//! Error types for Sleuth

use thiserror::Error;

/// Result type alias for Sleuth operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Sleuth
///
/// None of these escape [`AgentLoop::run`](crate::agent::AgentLoop::run):
/// backend and tool errors are rendered into the conversation as text.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Llm(String),

    #[error("{0}")]
    Tool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}
