mod client;
mod error;

pub type Result<T> = std::result::Result<T, error::Error>;

pub use client::{
    bearer_token_from_env, is_retryable_response, FetchedTweet, RetryPolicy,
    TweetClient, TweetSource, BEARER_TOKEN_ENV, DEFAULT_SERVER,
};
pub use error::Error;
