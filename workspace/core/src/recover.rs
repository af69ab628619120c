//! Recover the signer address from a personal message signature.
use k256::ecdsa::{recoverable, VerifyingKey};
use sha3::{Digest, Keccak256};
use web3_address::ethereum::Address;

use crate::{signature::Signature, Error, Result};

/// Preamble prepended to messages signed by wallet software.
pub const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Digest for a personal message, the preamble and the
/// decimal byte length of the message precede the message.
pub fn personal_message_digest(message: &[u8]) -> Keccak256 {
    Keccak256::new()
        .chain_update(PERSONAL_MESSAGE_PREFIX.as_bytes())
        .chain_update(message.len().to_string().as_bytes())
        .chain_update(message)
}

/// Normalize the trailing `v` byte to a recovery id.
fn recovery_id(v: u8) -> Result<u8> {
    match v {
        0 | 1 => Ok(v),
        27..=u8::MAX => Ok(1 - (v % 2)),
        _ => Err(Error::malformed(format!("invalid recovery id {}", v))),
    }
}

/// Recover the address that signed `message`.
pub fn recover(message: &str, signature: &Signature) -> Result<Address> {
    let mut bytes = signature.to_bytes()?;
    bytes[64] = recovery_id(bytes[64])?;

    let recoverable: recoverable::Signature = bytes
        .as_slice()
        .try_into()
        .map_err(|e: k256::ecdsa::Error| Error::malformed(e.to_string()))?;

    let public_key = recoverable
        .recover_verifying_key_from_digest(personal_message_digest(
            message.as_bytes(),
        ))
        .map_err(|e| Error::malformed(e.to_string()))?;

    key_address(&public_key)
}

/// Address for a public key.
pub fn key_address(public_key: &VerifyingKey) -> Result<Address> {
    let public_key: [u8; 33] = public_key.to_bytes().as_slice().try_into()?;
    let address: Address = (&public_key).try_into()?;
    Ok(address)
}
