//! ERC-721 wrapper for the device NFT contract.
//!
//! Registration transfers custody of a pre-minted device token, so the owner
//! needs the usual read calls plus `approve`/`transferFrom`. Minting is the
//! NFT issuer's concern and is not covered here.

use ioid_client::ChainClient;
use ioid_core::crypto::{abi, Wallet};
use ioid_core::{Address, Result, TxReceipt};

/// A handle to one deployed device NFT contract.
pub struct DeviceNft {
    chain: ChainClient,
    address: Address,
}

impl DeviceNft {
    /// Wrap the contract at `address`
    #[must_use]
    pub const fn new(chain: ChainClient, address: Address) -> Self {
        Self { chain, address }
    }

    /// The wrapped contract address
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Number of tokens held by `owner`
    pub async fn balance_of(&self, owner: Address) -> Result<u64> {
        let word = self.chain.call(self.address, &abi::balance_of_call(owner)).await?;
        abi::decode_u64(&word)
    }

    /// Current owner of `token_id`
    pub async fn owner_of(&self, token_id: u64) -> Result<Address> {
        let word = self.chain.call(self.address, &abi::owner_of_call(token_id)).await?;
        abi::decode_address(&word)
    }

    /// Address approved to transfer `token_id`, if any
    pub async fn get_approved(&self, token_id: u64) -> Result<Address> {
        let word = self.chain.call(self.address, &abi::get_approved_call(token_id)).await?;
        abi::decode_address(&word)
    }

    /// Approve `spender` (typically the ioID registry) to transfer
    /// `token_id` on the owner's behalf
    pub async fn approve(&self, wallet: &Wallet, spender: Address, token_id: u64) -> Result<TxReceipt> {
        let calldata = abi::approve_call(spender, token_id);
        self.chain.submit_call(wallet, self.address, calldata).await
    }

    /// Transfer `token_id` from `from` to `to`
    pub async fn transfer_from(
        &self,
        wallet: &Wallet,
        from: Address,
        to: Address,
        token_id: u64,
    ) -> Result<TxReceipt> {
        let calldata = abi::transfer_from_call(from, to, token_id);
        self.chain.submit_call(wallet, self.address, calldata).await
    }
}
