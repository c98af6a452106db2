//! Owner wallet: a secp256k1 signing key and its derived account address.

use crate::crypto::keccak::address_from_pubkey;
use crate::error::{IoidError, Result};
use crate::types::Address;
use k256::ecdsa::{RecoveryId, Signature, SigningKey};
use std::fmt;

/// A locally-held signing capability for the registration owner.
///
/// Constructed once per registration attempt; the key material never leaves
/// this struct and is not printed by its `Debug` impl.
pub struct Wallet {
    key: SigningKey,
    address: Address,
}

impl Wallet {
    /// Build a wallet from a 32-byte private key
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let key = SigningKey::from_slice(bytes)
            .map_err(|e| IoidError::InvalidKey(e.to_string()))?;
        let address = address_from_pubkey(key.verifying_key());
        Ok(Self { key, address })
    }

    /// Build a wallet from a hex-encoded private key, with or without the
    /// `0x` prefix
    pub fn from_hex(s: &str) -> Result<Self> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped)
            .map_err(|e| IoidError::InvalidKey(format!("not valid hex: {e}")))?;
        Self::from_bytes(&bytes)
    }

    /// The account address derived from the key
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Sign a 32-byte hash, returning the signature and its recovery id
    pub fn sign_hash(&self, hash: &[u8; 32]) -> Result<(Signature, RecoveryId)> {
        self.key
            .sign_prehash_recoverable(hash)
            .map_err(|e| IoidError::InvalidKey(format!("signing failed: {e}")))
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet").field("address", &self.address).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_known_address() {
        // Private key and address from the EIP-155 example transaction.
        let wallet = Wallet::from_hex(
            "0x4646464646464646464646464646464646464646464646464646464646464646",
        )
        .unwrap();
        assert_eq!(
            wallet.address().to_hex(),
            "0x9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f"
        );
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!(Wallet::from_hex("0xzz").is_err());
        assert!(Wallet::from_bytes(&[0u8; 32]).is_err()); // zero is out of range
        assert!(Wallet::from_bytes(&[1u8; 16]).is_err());
    }

    #[test]
    fn debug_does_not_leak_key_material() {
        let wallet = Wallet::from_bytes(&[0x11; 32]).unwrap();
        let rendered = format!("{wallet:?}");
        assert!(!rendered.contains("1111"));
        assert!(rendered.contains("address"));
    }
}
