use std::path::PathBuf;
use thiserror::Error;

/// Errors generated by the adapter server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated when a path is not a file.
    #[error("path {0} is not a file")]
    NotFile(PathBuf),

    /// Error generated when a required input parameter is missing.
    #[error("required parameter not supplied: {0}")]
    MissingParameter(&'static str),

    /// Error generated when an input parameter has the wrong type.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error(transparent)]
    Core(#[from] tweet_oracle_core::Error),

    #[error(transparent)]
    Client(#[from] tweet_oracle_client::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    AddrParse(#[from] std::net::AddrParseError),

    #[error(transparent)]
    InvalidHeaderValue(#[from] axum::http::header::InvalidHeaderValue),
}

impl Error {
    /// Determine if the invocation may succeed when retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Client(e) => e.is_retryable(),
            _ => false,
        }
    }
}
