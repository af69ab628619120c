//! Types for tweets fetched from the lookup API.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{validate::validate_tweet_id, Error, Result};

/// Identifier for a tweet.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TweetId(String);

impl fmt::Display for TweetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TweetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for TweetId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if !validate_tweet_id(s) {
            return Err(Error::InvalidTweetId(s.to_owned()));
        }
        Ok(Self(s.to_owned()))
    }
}

impl TryFrom<String> for TweetId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TweetId> for String {
    fn from(value: TweetId) -> Self {
        value.0
    }
}

/// Tweet text and author as needed by the pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TweetRecord {
    /// Identifier of the tweet.
    pub id: String,
    /// Text of the tweet.
    pub text: String,
    /// Handle of the posting account.
    pub author_handle: String,
}

/// Response body for a single tweet lookup with the
/// author expansion.
#[derive(Debug, Deserialize)]
pub struct TweetLookup {
    pub data: TweetData,
    #[serde(default)]
    pub includes: Option<TweetIncludes>,
}

/// Tweet object in a lookup response.
#[derive(Debug, Deserialize)]
pub struct TweetData {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub author_id: Option<String>,
}

/// Expanded objects in a lookup response.
#[derive(Debug, Default, Deserialize)]
pub struct TweetIncludes {
    #[serde(default)]
    pub users: Vec<TweetUser>,
}

/// User object in a lookup response.
#[derive(Debug, Deserialize)]
pub struct TweetUser {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub username: String,
}

impl TryFrom<TweetLookup> for TweetRecord {
    type Error = Error;

    fn try_from(value: TweetLookup) -> Result<Self> {
        let TweetLookup { data, includes } = value;
        let users = includes.map(|i| i.users).unwrap_or_default();

        // Prefer the user matching the author, the first expanded
        // user is the author for a single tweet lookup
        let author = match &data.author_id {
            Some(author_id) => users
                .iter()
                .find(|u| &u.id == author_id)
                .or_else(|| users.first()),
            None => users.first(),
        }
        .ok_or_else(|| Error::MissingAuthor(data.id.clone()))?;

        Ok(TweetRecord {
            author_handle: author.username.clone(),
            id: data.id,
            text: data.text,
        })
    }
}

impl TweetRecord {
    /// Parse a lookup response body.
    pub fn from_lookup(body: &serde_json::Value) -> Result<Self> {
        let lookup: TweetLookup = serde_json::from_value(body.clone())?;
        lookup.try_into()
    }
}
