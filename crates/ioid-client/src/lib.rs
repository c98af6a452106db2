//! HTTP collaborators for ioID device registration.
//!
//! Three independent clients, one per external interface:
//!
//! - [`DeviceClient`] — the device's relaxed-TLS signing endpoint
//! - [`IpfsClient`] — the content-addressed storage gateway
//! - [`ChainClient`] — the ledger JSON-RPC endpoint and transaction submitter

mod chain;
mod device;
mod ipfs;

pub use chain::ChainClient;
pub use device::{DeviceClient, DeviceClientBuilder};
pub use ipfs::IpfsClient;
pub use ioid_core::{IoidError, Result};
