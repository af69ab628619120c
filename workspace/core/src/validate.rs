//! Validation for addresses and tweet identifiers.
use sha3::{Digest, Keccak256};
use web3_address::ethereum::Address;

/// Number of hex characters in an encoded address.
const ADDRESS_HEX_LEN: usize = 40;

/// Render a mixed-case checksum (EIP-55) for a hex address body.
///
/// The input must be 40 ASCII hex characters without prefix.
fn checksum(hex_body: &str) -> String {
    let lower = hex_body.to_ascii_lowercase();
    let hash = Keccak256::digest(lower.as_bytes());
    let mut out = String::with_capacity(ADDRESS_HEX_LEN + 2);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Get the hex body of an address string when it has
/// the `0x` prefix and 40 hex characters.
fn hex_body(candidate: &str) -> Option<&str> {
    let body = candidate.strip_prefix("0x")?;
    if body.len() != ADDRESS_HEX_LEN {
        return None;
    }
    if !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    Some(body)
}

/// Convert an address string to checksum form.
pub fn to_checksum_address(candidate: &str) -> Option<String> {
    hex_body(candidate).map(checksum)
}

/// Checksum rendering of an address.
pub fn checksum_address(address: &Address) -> String {
    let rendered = address.to_string();
    let rendered = if rendered.starts_with("0x") {
        rendered
    } else {
        format!("0x{}", rendered)
    };
    to_checksum_address(&rendered).unwrap_or(rendered)
}

/// Determine if a string is a well formed address.
///
/// Single case addresses only need the right length and charset,
/// mixed case addresses must also carry a valid checksum.
pub fn is_valid_address(candidate: &str) -> bool {
    let body = match hex_body(candidate) {
        Some(body) => body,
        None => return false,
    };

    let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return checksum(body) == candidate;
    }
    true
}

/// Validate a tweet identifier, tweet ids are decimal numbers.
pub fn validate_tweet_id(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
