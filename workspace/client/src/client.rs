use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use tweet_oracle_core::{TweetId, TweetRecord};

use crate::{Error, Result};

/// Environment variable for the lookup API bearer token.
pub const BEARER_TOKEN_ENV: &str = "TWITTER_API_BEARER_TOKEN";

/// Default lookup API server.
pub const DEFAULT_SERVER: &str = "https://api.twitter.com/";

/// Read the bearer token from the environment.
pub fn bearer_token_from_env() -> Result<SecretString> {
    std::env::var(BEARER_TOKEN_ENV)
        .ok()
        .map(SecretString::new)
        .ok_or(Error::BearerToken(BEARER_TOKEN_ENV))
}

/// Determine if an upstream body declares a transient error.
pub fn is_retryable_response(body: &Value) -> bool {
    body.get("Response").and_then(Value::as_str) == Some("Error")
}

/// Settings for retrying failed lookups.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub attempts: u32,
    /// Delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_millis(1000),
        }
    }
}

/// Tweet returned by a lookup.
#[derive(Debug, Clone)]
pub struct FetchedTweet {
    /// Status code of the upstream response.
    pub status: u16,
    /// Response body as returned by the upstream.
    pub body: Value,
    /// Tweet parsed from the body.
    pub record: TweetRecord,
}

/// Trait for types that can fetch a tweet by id.
#[async_trait]
pub trait TweetSource {
    /// Fetch a tweet.
    async fn fetch(&self, id: &TweetId) -> Result<FetchedTweet>;
}

/// Client for the tweet lookup API.
pub struct TweetClient {
    client: Client,
    server: Url,
    bearer_token: SecretString,
    retry: RetryPolicy,
}

impl TweetClient {
    /// Create a new client.
    pub fn new(
        server: Url,
        bearer_token: SecretString,
        retry: RetryPolicy,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        // Joining onto a base without a trailing slash drops
        // the last path segment
        let mut server = server;
        if !server.path().ends_with('/') {
            let path = format!("{}/", server.path());
            server.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            server,
            bearer_token,
            retry,
        })
    }

    /// URL to lookup a tweet with the author expansion.
    pub fn lookup_url(&self, id: &TweetId) -> Result<Url> {
        let mut url = self.server.join(&format!("2/tweets/{}", id))?;
        url.query_pairs_mut().append_pair("expansions", "author_id");
        Ok(url)
    }

    /// Fetch a tweet, retrying transient failures.
    pub async fn fetch_tweet(&self, id: &TweetId) -> Result<FetchedTweet> {
        let attempts = self.retry.attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.request(id).await {
                Ok(tweet) => return Ok(tweet),
                Err(e) if e.is_retryable() && attempt < attempts => {
                    tracing::warn!(
                        tweet_id = %id,
                        attempt = %attempt,
                        "tweet lookup failure: {}", e);
                    tokio::time::sleep(self.retry.delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn request(&self, id: &TweetId) -> Result<FetchedTweet> {
        let url = self.lookup_url(id)?;
        tracing::debug!(url = %url, "lookup tweet");

        let response = self
            .client
            .get(url)
            .bearer_auth(self.bearer_token.expose_secret())
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let body: Option<Value> = serde_json::from_slice(&bytes).ok();

        if let Some(body) = &body {
            if is_retryable_response(body) {
                return Err(Error::Upstream(body.clone()));
            }
        }

        if !status.is_success() {
            return Err(Error::ResponseCode(status.into()));
        }

        let body = match body {
            Some(body) => body,
            None => serde_json::from_slice(&bytes)?,
        };

        if body.get("data").is_none() {
            if let Some(detail) = lookup_error(&body) {
                return Err(Error::Lookup(id.to_string(), detail));
            }
        }

        let record = TweetRecord::from_lookup(&body)?;
        Ok(FetchedTweet {
            status: status.into(),
            body,
            record,
        })
    }
}

/// Describe the first error in a lookup body.
fn lookup_error(body: &Value) -> Option<String> {
    let error = body.get("errors")?.as_array()?.first()?;
    let detail = error
        .get("detail")
        .or_else(|| error.get("title"))
        .and_then(Value::as_str)
        .unwrap_or("unknown error");
    Some(detail.to_owned())
}

#[async_trait]
impl TweetSource for TweetClient {
    async fn fetch(&self, id: &TweetId) -> Result<FetchedTweet> {
        self.fetch_tweet(id).await
    }
}
