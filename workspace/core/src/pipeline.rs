//! Verify the signature attested by a tweet.
use serde::Serialize;

use crate::{
    recover::recover,
    signature::{extract, Signature},
    tweet::TweetRecord,
    validate::{checksum_address, is_valid_address},
    Result,
};

/// Outcome of verifying a tweet.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// Identifier of the tweet.
    pub tweet_id: String,
    /// Lowercase author handle, the signed message.
    pub handle: String,
    /// Signature extracted from the tweet text.
    pub signature: Signature,
    /// Recovered signer address in checksum form.
    pub address: String,
    /// Whether the recovered address is well formed.
    pub valid: bool,
}

/// Extract the signature from a tweet and recover the address
/// that signed the author handle.
///
/// Failures are terminal, only the first signature in the
/// text is considered.
pub fn verify(tweet: &TweetRecord) -> Result<VerificationResult> {
    let handle = tweet.author_handle.to_lowercase();
    let signature = extract(&tweet.text)?;
    let address = checksum_address(&recover(&handle, &signature)?);
    let valid = is_valid_address(&address);

    tracing::debug!(
        tweet_id = %tweet.id,
        handle = %handle,
        address = %address,
        valid = %valid,
        "verified tweet");

    Ok(VerificationResult {
        tweet_id: tweet.id.clone(),
        handle,
        signature,
        address,
        valid,
    })
}
