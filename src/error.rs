use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] tweet_oracle_core::Error),

    #[error(transparent)]
    Client(#[from] tweet_oracle_client::Error),

    #[error(transparent)]
    Server(#[from] tweet_oracle_server::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
