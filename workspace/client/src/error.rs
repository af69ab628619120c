use serde_json::Value;
use thiserror::Error;

/// Errors generated by the tweet client.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated when the upstream body declares an error.
    #[error("upstream reported an error: {0}")]
    Upstream(Value),

    /// Error generated when the upstream responds with a
    /// non-success status code.
    #[error("unexpected response status code {0}")]
    ResponseCode(u16),

    /// Error generated when a lookup returns errors
    /// instead of a tweet.
    #[error("tweet {0} lookup failed: {1}")]
    Lookup(String, String),

    /// Error generated when the bearer token is not set.
    #[error("bearer token environment variable {0} is not set")]
    BearerToken(&'static str),

    #[error(transparent)]
    Core(#[from] tweet_oracle_core::Error),

    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Determine if the failed request may succeed when retried.
    ///
    /// Only upstream bodies that declare an error and transport
    /// failures are retried, other responses are final.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Upstream(_) => true,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
