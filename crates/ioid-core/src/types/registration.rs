//! Registration protocol values.

use crate::error::IoidError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 32-byte structured-data digest to be signed by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Wrap raw digest bytes
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Fixed-width hex rendering with the `0x` prefix, as the device's
    /// `/sign` endpoint expects
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for Digest {
    type Err = IoidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        if stripped.len() != 64 {
            return Err(IoidError::Config(format!(
                "digest must be 32 bytes, got {} hex characters",
                stripped.len()
            )));
        }
        let bytes = hex::decode(stripped)
            .map_err(|e| IoidError::Config(format!("digest {s} is not valid hex: {e}")))?;
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Signature scalars plus the recovery discriminant selected by probing both
/// candidates against the expected signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveredSignature {
    /// First 32-byte scalar
    pub r: [u8; 32],
    /// Second 32-byte scalar
    pub s: [u8; 32],
    /// Recovery discriminant in Ethereum convention (27 or 28)
    pub v: u8,
}

impl RecoveredSignature {
    /// `r` as 0x-prefixed hex
    #[must_use]
    pub fn r_hex(&self) -> String {
        format!("0x{}", hex::encode(self.r))
    }

    /// `s` as 0x-prefixed hex
    #[must_use]
    pub fn s_hex(&self) -> String {
        format!("0x{}", hex::encode(self.s))
    }
}

/// A confirmed transaction receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Hash of the included transaction
    pub transaction_hash: String,
    /// Block the transaction was included in
    pub block_number: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_hex_round_trip() {
        let d = Digest::new([0xab; 32]);
        assert_eq!(d.to_hex().len(), 66);
        let parsed: Digest = d.to_hex().parse().unwrap();
        assert_eq!(parsed, d);
    }

    #[test]
    fn digest_rejects_short_hex() {
        assert!("0xabcd".parse::<Digest>().is_err());
    }
}
