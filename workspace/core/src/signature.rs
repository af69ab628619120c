//! Extract wallet signatures embedded in free text.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

use crate::{Error, Result};

/// Number of hex characters in an encoded signature.
pub const SIGNATURE_HEX_LEN: usize = 130;

/// Number of bytes in a decoded signature.
pub const SIGNATURE_LEN: usize = 65;

// Classes are spelled out so matching stays ASCII only.
static SIGNATURE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("0x[A-Fa-f0-9]{{{}}}", SIGNATURE_HEX_LEN)).unwrap()
});

/// Hex encoded signature found in a tweet, `0x` followed by
/// 130 hex characters for the r, s and v components.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
    /// The signature as it appeared in the text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the signature bytes.
    pub fn to_bytes(&self) -> Result<[u8; SIGNATURE_LEN]> {
        let encoded = self
            .0
            .strip_prefix("0x")
            .ok_or_else(|| Error::malformed("missing 0x prefix"))?;
        let bytes = hex::decode(encoded)
            .map_err(|e| Error::malformed(e.to_string()))?;
        bytes
            .as_slice()
            .try_into()
            .map_err(|_| Error::malformed("expected 65 bytes"))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Signature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Find the first signature in a text.
///
/// When the text contains several candidates only the leftmost
/// one is returned, no attempt is made to choose between them.
pub fn extract(text: &str) -> Result<Signature> {
    SIGNATURE_PATTERN
        .find(text)
        .map(|m| Signature(m.as_str().to_owned()))
        .ok_or(Error::SignatureNotFound)
}
