//! Device identity registration workflow for the ioID registry.
//!
//! [`Registrar`] runs one registration attempt end to end: it reads the
//! registry nonce, builds the permit digest, obtains and disambiguates the
//! device's signature, anchors the DID document, and submits the `register`
//! transaction. [`DeviceNft`] wraps the ERC-721 contract whose token the
//! registration binds.

mod nft;
mod registrar;

pub use nft::DeviceNft;
pub use registrar::{Registrar, Registration};
pub use ioid_core::{IoidError, Result};
