//! 20-byte account addresses.

use crate::error::IoidError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 20-byte account address.
///
/// Stored as raw bytes, so equality is inherently case-insensitive with
/// respect to the hex rendering the ledger or device used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// Wrap raw address bytes
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Lowercase hex rendering with the `0x` prefix
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = IoidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        if stripped.len() != 40 {
            return Err(IoidError::InvalidAddress(format!(
                "expected 40 hex characters, got {}",
                stripped.len()
            )));
        }
        let bytes = hex::decode(stripped)
            .map_err(|e| IoidError::InvalidAddress(format!("{s}: {e}")))?;
        let mut out = [0u8; 20];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_prefix() {
        let a: Address = "0x0A7e595C7889dF3652A19aF52C18377bF17e027D".parse().unwrap();
        let b: Address = "0a7e595c7889df3652a19af52c18377bf17e027d".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_hex(), "0x0a7e595c7889df3652a19af52c18377bf17e027d");
    }

    #[test]
    fn rejects_bad_input() {
        assert!("0x123".parse::<Address>().is_err());
        assert!("0xGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGG"
            .parse::<Address>()
            .is_err());
        assert!(String::new().parse::<Address>().is_err());
    }
}
