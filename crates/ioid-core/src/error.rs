use thiserror::Error;

/// Result type alias for ioID operations
pub type Result<T> = std::result::Result<T, IoidError>;

/// Errors that can occur during device identity registration
#[derive(Error, Debug)]
pub enum IoidError {
    /// The device service endpoint could not be reached
    #[error("device unreachable at {url}: {reason}")]
    DeviceUnreachable {
        /// Device service URL that failed
        url: String,
        /// Transport-level failure description
        reason: String,
    },

    /// The device responded but advertised no DID
    #[error("no device identity found at the device service URL")]
    NoIdentity,

    /// The device refused or failed to sign the digest
    #[error("device signing failed: {0}")]
    SigningFailed(String),

    /// The device responded but returned no DID document
    #[error("no DID document found at the device service URL")]
    NoDocument,

    /// Signature does not recover to the expected signer under either
    /// recovery parameter
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// The registry nonce could not be read, so no digest can be built
    #[error("digest unavailable: {0}")]
    DigestUnavailable(String),

    /// The storage gateway could not be reached
    #[error("storage gateway unavailable: {0}")]
    AnchorUnavailable(String),

    /// The storage gateway responded without a content locator
    #[error("storage gateway rejected the document: {0}")]
    AnchorRejected(String),

    /// Gas estimation failed; the registration call would revert
    #[error("gas estimation failed: {0}")]
    EstimationFailed(String),

    /// The transaction could not be broadcast
    #[error("transaction submission failed: {0}")]
    SubmissionFailed(String),

    /// The transaction was included but executed with failure status
    #[error("transaction reverted: {tx_hash}")]
    Reverted {
        /// Hash of the reverted transaction
        tx_hash: String,
    },

    /// Malformed DID string
    #[error("invalid DID: {0}")]
    InvalidDid(String),

    /// Malformed account address
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Malformed or out-of-range signing key
    #[error("invalid signing key: {0}")]
    InvalidKey(String),

    /// JSON-RPC call failed or returned an undecodable result
    #[error("RPC {method} failed: {message}")]
    Rpc {
        /// JSON-RPC method name
        method: String,
        /// Error message from the node or decoder
        message: String,
    },

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl IoidError {
    /// Returns true if the error is a transport failure worth retrying
    /// from scratch (fresh nonce, fresh digest, fresh signature)
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::DeviceUnreachable { .. } | Self::AnchorUnavailable(_) | Self::SubmissionFailed(_)
        )
    }

    /// Returns true if the ledger has consumed the nonce, meaning any retry
    /// must rebuild the digest before re-signing
    #[must_use]
    pub const fn nonce_consumed(&self) -> bool {
        matches!(self, Self::Reverted { .. })
    }
}
