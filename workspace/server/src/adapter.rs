//! Adapter invocation shared by all transports.
use serde::Serialize;
use serde_json::Value;

use tweet_oracle_client::{FetchedTweet, TweetSource};
use tweet_oracle_core::{verify, TweetId, VerificationResult};

use crate::{Error, Result};

/// Job run id used when the input does not carry one.
pub const DEFAULT_JOB_RUN_ID: &str = "1";

/// Status code for a successful invocation.
pub const STATUS_OK: u16 = 200;

/// Status code for a failed invocation.
pub const STATUS_ERRORED: u16 = 500;

/// Output of an adapter invocation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterResponse {
    /// Job run identifier echoed from the input.
    #[serde(rename = "jobRunID")]
    pub job_run_id: String,
    /// Upstream tweet body with the result attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Verification result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<VerificationResult>,
    /// Set to `errored` for failed invocations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Error message for failed invocations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Status code for the invocation.
    pub status_code: u16,
}

impl AdapterResponse {
    /// Response for a verified tweet.
    pub fn success(
        job_run_id: String,
        mut data: Value,
        result: VerificationResult,
    ) -> Result<Self> {
        if let Value::Object(map) = &mut data {
            map.insert(String::from("result"), serde_json::to_value(&result)?);
        }
        Ok(Self {
            job_run_id,
            data: Some(data),
            result: Some(result),
            status: None,
            error: None,
            status_code: STATUS_OK,
        })
    }

    /// Response for a failed invocation.
    pub fn errored(job_run_id: String, error: &Error) -> Self {
        Self {
            job_run_id,
            data: None,
            result: None,
            status: Some(String::from("errored")),
            error: Some(error.to_string()),
            status_code: STATUS_ERRORED,
        }
    }
}

/// Get the job run id from an input.
pub fn job_run_id(input: &Value) -> String {
    match input.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => String::from(DEFAULT_JOB_RUN_ID),
    }
}

/// Get the tweet id from an input.
pub fn tweet_id(input: &Value) -> Result<TweetId> {
    let value = input
        .get("data")
        .and_then(|data| data.get("tweetId"))
        .ok_or(Error::MissingParameter("tweetId"))?;
    let id = match value {
        Value::String(id) => id.clone(),
        Value::Number(id) if id.is_u64() => id.to_string(),
        Value::Null => return Err(Error::MissingParameter("tweetId")),
        _ => return Err(Error::InvalidParameter("tweetId")),
    };
    Ok(id.parse()?)
}

/// Fetches tweets and verifies the attested signature.
pub struct Adapter {
    source: Box<dyn TweetSource + Send + Sync + 'static>,
}

impl Adapter {
    /// Create an adapter for a tweet source.
    pub fn new(source: Box<dyn TweetSource + Send + Sync + 'static>) -> Self {
        Self { source }
    }

    /// Run an invocation for a raw input.
    ///
    /// Any failure is reported as an errored response, the
    /// invocation is never partially successful.
    pub async fn invoke(&self, input: &Value) -> AdapterResponse {
        let job_run_id = job_run_id(input);
        let outcome = match self.run(input).await {
            Ok((tweet, result)) => {
                AdapterResponse::success(job_run_id.clone(), tweet.body, result)
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    job_run_id = %job_run_id,
                    retryable = %e.is_retryable(),
                    "{}", e);
                AdapterResponse::errored(job_run_id, &e)
            }
        }
    }

    async fn run(
        &self,
        input: &Value,
    ) -> Result<(FetchedTweet, VerificationResult)> {
        let tweet_id = tweet_id(input)?;
        tracing::info!(tweet_id = %tweet_id, "verify tweet");

        let tweet = self.source.fetch(&tweet_id).await?;
        let result = verify(&tweet.record)?;

        tracing::info!(
            tweet_id = %tweet_id,
            handle = %result.handle,
            address = %result.address,
            verified = %result.valid);

        Ok((tweet, result))
    }
}
