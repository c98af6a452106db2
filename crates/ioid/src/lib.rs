//! Rust client for binding IoT device DIDs to on-chain ioID identities.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ioid::{ChainClient, DeviceClient, IpfsClient, Registrar, Wallet};
//!
//! #[tokio::main]
//! async fn main() -> ioid::Result<()> {
//!     let registrar = Registrar::new(
//!         DeviceClient::new("https://192.168.1.1:8000"),
//!         IpfsClient::new("https://ipfs.example.com"),
//!         ChainClient::new("https://babel-api.testnet.iotex.io"),
//!         Wallet::from_hex(&std::env::var("IOID_PRIVATE_KEY")?)?,
//!         "0x0A7e595C7889dF3652A19aF52C18377bF17e027D".parse()?,
//!     );
//!
//!     let device = registrar.fetch_device().await?;
//!     let outcome = registrar
//!         .register(&device, registrar.owner(), nft_contract, token_id)
//!         .await?;
//!     println!("registered in tx {}", outcome.receipt.transaction_hash);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/ioid/0.1.0")]

// Re-export core types
pub use ioid_core::*;

// Re-export the crypto surface under its own name
pub use ioid_core::crypto::{self, Wallet};

// Re-export clients
pub use ioid_client::{ChainClient, DeviceClient, DeviceClientBuilder, IpfsClient};

// Re-export the workflow
pub use ioid_registrar::{DeviceNft, Registrar, Registration};

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;
