//! HTTP client for the device-controlled signing endpoint.
//!
//! The endpoint typically lives on a LAN address with a self-signed
//! certificate, so transport trust is relaxed. Nothing in the payload is
//! trusted for authorization; only the signature over the permit digest is.

use ioid_core::{DeviceIdentity, Did, DidDocument, Digest, IoidError, Result};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default timeout for the `/did` and `/diddoc` read calls
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the device's `/did`, `/sign`, and `/diddoc` endpoints
#[derive(Clone)]
pub struct DeviceClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: String,
    read_timeout: Duration,
    sign_timeout: Option<Duration>,
}

#[derive(Deserialize)]
struct DidResponse {
    #[serde(default)]
    did: Option<Did>,
    #[serde(default, alias = "puk")]
    public_key: Option<String>,
}

#[derive(Deserialize)]
struct SignResponse {
    #[serde(default)]
    sign: Option<String>,
}

#[derive(Deserialize)]
struct DidDocResponse {
    #[serde(default)]
    diddoc: Option<DidDocument>,
}

impl DeviceClient {
    /// Create a client for the given device service URL using default
    /// settings
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        DeviceClientBuilder::new(base_url).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> DeviceClientBuilder {
        DeviceClientBuilder::new(base_url)
    }

    /// The configured device service URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Fetch the device's self-asserted identity from `GET /did`
    pub async fn fetch_identity(&self) -> Result<DeviceIdentity> {
        let url = format!("{}/did", self.inner.base_url);
        debug!(url = %url, "fetching device identity");

        let response = self
            .inner
            .http
            .get(&url)
            .timeout(self.inner.read_timeout)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;
        let body: DidResponse = self.decode(response).await?;

        let did = body.did.ok_or(IoidError::NoIdentity)?;
        Ok(DeviceIdentity {
            did,
            public_key: body.public_key,
        })
    }

    /// Request a raw signature over `digest` from `POST /sign`.
    ///
    /// Signing may involve on-device confirmation or hardware operations, so
    /// no timeout applies unless one was set on the builder.
    pub async fn request_signature(&self, digest: &Digest) -> Result<Vec<u8>> {
        let url = format!("{}/sign", self.inner.base_url);
        debug!(url = %url, digest = %digest, "requesting device signature");

        let mut request = self
            .inner
            .http
            .post(&url)
            .json(&serde_json::json!({ "hex": digest.to_hex() }));
        if let Some(timeout) = self.inner.sign_timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.unreachable(e))?;
        if !response.status().is_success() {
            return Err(IoidError::SigningFailed(format!(
                "device returned HTTP {}",
                response.status()
            )));
        }

        let body: SignResponse = response
            .json()
            .await
            .map_err(|e| IoidError::SigningFailed(format!("undecodable response: {e}")))?;
        let sign = body
            .sign
            .ok_or_else(|| IoidError::SigningFailed("response carried no signature field".into()))?;

        hex::decode(sign.strip_prefix("0x").unwrap_or(&sign))
            .map_err(|e| IoidError::SigningFailed(format!("signature is not valid hex: {e}")))
    }

    /// Fetch the device's DID document from `GET /diddoc`
    pub async fn fetch_document(&self) -> Result<DidDocument> {
        let url = format!("{}/diddoc", self.inner.base_url);
        debug!(url = %url, "fetching DID document");

        let response = self
            .inner
            .http
            .get(&url)
            .timeout(self.inner.read_timeout)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;
        let body: DidDocResponse = self.decode(response).await?;

        body.diddoc.ok_or(IoidError::NoDocument)
    }

    async fn decode<T: serde::de::DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(IoidError::DeviceUnreachable {
                url: self.inner.base_url.clone(),
                reason: format!("HTTP {status}"),
            });
        }
        response.json().await.map_err(|e| IoidError::DeviceUnreachable {
            url: self.inner.base_url.clone(),
            reason: format!("undecodable response: {e}"),
        })
    }

    fn unreachable(&self, err: reqwest::Error) -> IoidError {
        let reason = if err.is_timeout() {
            "request timed out".to_string()
        } else {
            err.to_string()
        };
        IoidError::DeviceUnreachable {
            url: self.inner.base_url.clone(),
            reason,
        }
    }
}

/// Builder for configuring a [`DeviceClient`]
pub struct DeviceClientBuilder {
    base_url: String,
    read_timeout: Duration,
    sign_timeout: Option<Duration>,
    accept_invalid_certs: bool,
}

impl DeviceClientBuilder {
    /// Create a new builder for the given device service URL
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            read_timeout: DEFAULT_READ_TIMEOUT,
            sign_timeout: None,
            accept_invalid_certs: true,
        }
    }

    /// Set the timeout for the `/did` and `/diddoc` read calls
    #[must_use]
    pub const fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Bound the otherwise-unbounded `/sign` call
    #[must_use]
    pub const fn sign_timeout(mut self, timeout: Duration) -> Self {
        self.sign_timeout = Some(timeout);
        self
    }

    /// Require a valid certificate chain from the device (defaults to
    /// accepting self-signed certificates)
    #[must_use]
    pub const fn require_valid_certs(mut self) -> Self {
        self.accept_invalid_certs = false;
        self
    }

    /// Build the client
    #[must_use]
    pub fn build(self) -> DeviceClient {
        let http = HttpClient::builder()
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .expect("Failed to build HTTP client");

        DeviceClient {
            inner: Arc::new(ClientInner {
                http,
                base_url: self.base_url.trim_end_matches('/').to_string(),
                read_timeout: self.read_timeout,
                sign_timeout: self.sign_timeout,
            }),
        }
    }
}
