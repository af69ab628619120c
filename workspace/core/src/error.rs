use thiserror::Error;

/// Errors generated by the verification pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated when the text does not contain a signature.
    #[error("no signature in tweet")]
    SignatureNotFound,

    /// Error generated when a signature cannot be used for recovery.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// Error generated when a tweet identifier is not numeric.
    #[error("invalid tweet id '{0}'")]
    InvalidTweetId(String),

    /// Error generated when a tweet lookup has no author expansion.
    #[error("tweet {0} does not include the author")]
    MissingAuthor(String),

    /// Error generated converting from a slice.
    #[error(transparent)]
    TryFromSlice(#[from] std::array::TryFromSliceError),

    #[error(transparent)]
    Address(#[from] web3_address::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a malformed signature error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedSignature(msg.into())
    }
}
