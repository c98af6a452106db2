//! Content-addressed storage gateway client (Document Anchor).

use ioid_core::{DidDocument, IoidError, Result};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default timeout for gateway uploads
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for an IPFS upload gateway
#[derive(Clone, Debug)]
pub struct IpfsClient {
    http: HttpClient,
    base_url: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(default)]
    cid: Option<String>,
}

impl IpfsClient {
    /// Create a client for the given gateway URL
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom upload timeout
    #[must_use]
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Upload a DID document and return its content locator.
    ///
    /// No local caching: every registration attempt re-uploads. A content-
    /// addressed gateway returns the same CID for identical content, so the
    /// operation is idempotent by content rather than by call.
    pub async fn upload(&self, document: &DidDocument) -> Result<String> {
        let url = format!("{}/upload", self.base_url);
        debug!(url = %url, "anchoring DID document");

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "data": document, "type": "ipfs" }))
            .send()
            .await
            .map_err(|e| IoidError::AnchorUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IoidError::AnchorRejected(format!("gateway returned HTTP {status}")));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| IoidError::AnchorRejected(format!("undecodable response: {e}")))?;
        body.cid
            .ok_or_else(|| IoidError::AnchorRejected("response carried no cid field".into()))
    }
}
