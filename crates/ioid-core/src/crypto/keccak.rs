//! Keccak-256 helpers.

use crate::types::Address;
use k256::ecdsa::VerifyingKey;
use sha3::{Digest as _, Keccak256};

/// Keccak-256 hash of `data`
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// 4-byte function selector for a canonical signature string,
/// e.g. `"nonces(address)"`
#[must_use]
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Account address of a secp256k1 public key: the low 20 bytes of the
/// Keccak-256 hash of the uncompressed point, SEC1 prefix stripped
#[must_use]
pub fn address_from_pubkey(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash[12..]);
    Address::new(out)
}
