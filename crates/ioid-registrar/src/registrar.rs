//! The device identity registration workflow.

use ioid_client::{ChainClient, DeviceClient, IpfsClient};
use ioid_core::crypto::{abi, disambiguate, permit_digest, Wallet};
use ioid_core::{Address, DeviceIdentity, Result, TxReceipt};
use tracing::{debug, info};

/// Outcome of a confirmed registration.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Confirmed transaction receipt
    pub receipt: TxReceipt,
    /// Locator URI of the anchored DID document
    pub document_uri: String,
}

/// Orchestrates one registration attempt end to end.
///
/// Every collaborator is an explicit handle constructed per attempt; there is
/// no shared mutable state, so attempts for different devices may run in
/// parallel. Two attempts for the *same* device race on the registry nonce
/// and the ledger rejects the loser.
pub struct Registrar {
    device: DeviceClient,
    ipfs: IpfsClient,
    chain: ChainClient,
    wallet: Wallet,
    registry: Address,
}

impl Registrar {
    /// Assemble a registrar from its collaborators
    #[must_use]
    pub const fn new(
        device: DeviceClient,
        ipfs: IpfsClient,
        chain: ChainClient,
        wallet: Wallet,
        registry: Address,
    ) -> Self {
        Self {
            device,
            ipfs,
            chain,
            wallet,
            registry,
        }
    }

    /// The owner address derived from the wallet
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.wallet.address()
    }

    /// Fetch the device's identity from its service endpoint
    pub async fn fetch_device(&self) -> Result<DeviceIdentity> {
        self.device.fetch_identity().await
    }

    /// Run the full registration sequence for `device`.
    ///
    /// Strictly sequential: nonce → digest → device signature →
    /// disambiguation → document fetch → anchor → on-chain `register` →
    /// confirmation. The first error aborts the attempt; an anchored document
    /// with no subsequent submission is a harmless leftover and is not rolled
    /// back.
    pub async fn register(
        &self,
        device: &DeviceIdentity,
        owner: Address,
        nft_contract: Address,
        token_id: u64,
    ) -> Result<Registration> {
        let device_address = device.address();
        info!(did = %device.did, %owner, token_id, "starting device registration");

        // The nonce is read here, immediately before digest construction,
        // and nowhere cached: the registry advances it on every successful
        // registration.
        let chain_id = self.chain.chain_id().await?;
        let nonce = self.chain.registry_nonce(self.registry, device_address).await?;
        let digest = permit_digest(self.registry, chain_id, owner, nonce);
        debug!(nonce, digest = %digest, "permit digest built");

        let raw_signature = self.device.request_signature(&digest).await?;
        // The signer identity is the DID address, by design; an advertised
        // public key hint is never consulted.
        let signature = disambiguate(&digest, &raw_signature, device_address)?;
        debug!(v = signature.v, "signature verified against device address");

        let document = self.device.fetch_document().await?;
        let cid = self.ipfs.upload(&document).await?;
        let document_uri = format!("ipfs://{cid}");
        info!(%document_uri, "DID document anchored");

        let calldata = abi::register_call(
            nft_contract,
            token_id,
            owner,
            device_address,
            &digest,
            &document_uri,
            &signature,
        );
        let receipt = self.chain.submit_call(&self.wallet, self.registry, calldata).await?;
        info!(tx_hash = %receipt.transaction_hash, block = receipt.block_number, "registration confirmed");

        Ok(Registration {
            receipt,
            document_uri,
        })
    }
}
