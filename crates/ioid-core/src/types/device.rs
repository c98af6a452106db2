//! Device identity types.

use crate::error::IoidError;
use crate::types::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical DID prefix for IoTeX device identities
pub const DID_PREFIX: &str = "did:io:";

/// A device DID in the canonical `did:io:<address>` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Did {
    raw: String,
    address: Address,
}

impl Did {
    /// The 20-byte account identifier embedded in the DID.
    ///
    /// This address *is* the device's signing identity: signature
    /// disambiguation compares recovered addresses against it, never against
    /// an advertised public key.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The DID string as received from the device
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for Did {
    type Err = IoidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let suffix = s
            .strip_prefix(DID_PREFIX)
            .ok_or_else(|| IoidError::InvalidDid(format!("missing `{DID_PREFIX}` prefix: {s}")))?;
        let address = suffix
            .parse::<Address>()
            .map_err(|e| IoidError::InvalidDid(format!("{s}: {e}")))?;
        Ok(Self {
            raw: s.to_string(),
            address,
        })
    }
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl Serialize for Did {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Did {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Identity information advertised by a device at `GET /did`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// The device's self-asserted DID
    pub did: Did,

    /// Advisory public key hint. Never trusted for recovery; the DID address
    /// is the signing identity.
    #[serde(default, alias = "puk", skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

impl DeviceIdentity {
    /// The device address extracted from the DID
    #[must_use]
    pub const fn address(&self) -> Address {
        self.did.address()
    }
}

/// An opaque DID document as served by the device at `GET /diddoc`.
///
/// The document is anchored to content-addressed storage verbatim; nothing in
/// it is trusted for authorization.
pub type DidDocument = serde_json::Value;
