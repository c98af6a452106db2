//! Command implementations.

pub mod device;
pub mod nft;
pub mod register;
pub mod sign_digest;

use anyhow::Context as _;
use ioid::{Address, ChainClient, DeviceClient, IpfsClient, Wallet};

/// Shared context for all commands.
pub struct Context {
    /// Ledger JSON-RPC endpoint
    pub provider_url: String,

    /// Registry contract address
    pub registry: String,

    /// Device service URL
    pub device_url: String,

    /// IPFS upload gateway URL, if configured
    pub ipfs_url: Option<String>,

    /// Owner private key, if configured
    pub private_key: Option<String>,
}

impl Context {
    /// Parse the configured registry address.
    pub fn registry(&self) -> anyhow::Result<Address> {
        self.registry
            .parse()
            .with_context(|| format!("bad registry address `{}`", self.registry))
    }

    /// Build the owner wallet, failing if no key is configured.
    pub fn wallet(&self) -> anyhow::Result<Wallet> {
        let key = self.private_key.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "owner private key required.\n\n\
                 Set it with one of:\n  \
                 1. --private-key <HEX>\n  \
                 2. IOID_PRIVATE_KEY environment variable"
            )
        })?;
        Ok(Wallet::from_hex(key)?)
    }

    /// Client for the device service endpoint.
    pub fn device_client(&self) -> DeviceClient {
        DeviceClient::new(&self.device_url)
    }

    /// Client for the ledger RPC endpoint.
    pub fn chain_client(&self) -> ChainClient {
        ChainClient::new(&self.provider_url)
    }

    /// Client for the IPFS gateway, failing if none is configured.
    pub fn ipfs_client(&self) -> anyhow::Result<IpfsClient> {
        let url = self.ipfs_url.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "IPFS gateway URL required.\n\n\
                 Set it with one of:\n  \
                 1. --ipfs-url <URL>\n  \
                 2. IOID_IPFS_URL environment variable"
            )
        })?;
        Ok(IpfsClient::new(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context {
        Context {
            provider_url: "http://localhost:8545".to_string(),
            registry: "0x0A7e595C7889dF3652A19aF52C18377bF17e027D".to_string(),
            device_url: "https://192.168.1.1:8000".to_string(),
            ipfs_url: None,
            private_key: None,
        }
    }

    #[test]
    fn registry_parses_configured_address() {
        let ctx = context();
        assert!(ctx.registry().is_ok());
    }

    #[test]
    fn wallet_requires_a_configured_key() {
        let ctx = context();
        let err = ctx.wallet().unwrap_err();
        assert!(err.to_string().contains("IOID_PRIVATE_KEY"));
    }

    #[test]
    fn ipfs_client_requires_a_configured_url() {
        let ctx = context();
        let err = ctx.ipfs_client().unwrap_err();
        assert!(err.to_string().contains("IOID_IPFS_URL"));
    }
}
