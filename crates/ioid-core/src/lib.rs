//! Core types and protocol computations for ioID device registration.
//!
//! This crate provides the foundational pieces used across the workspace:
//!
//! - **Types**: [`Did`], [`Address`], [`Digest`], [`RecoveredSignature`]
//! - **Errors**: the [`IoidError`] taxonomy shared by every component
//! - **Crypto**: the permit digest builder, the signature disambiguator,
//!   wallet/address derivation, and EIP-155 transaction signing
//!
//! Everything here is pure computation; the HTTP and ledger collaborators
//! live in `ioid-client`.
//!
//! # Example
//!
//! ```rust
//! use ioid_core::{crypto, Address};
//!
//! let registry: Address = "0x0A7e595C7889dF3652A19aF52C18377bF17e027D".parse().unwrap();
//! let owner: Address = "0x1234567890abcdef1234567890abcdef12345678".parse().unwrap();
//! let digest = crypto::permit_digest(registry, 4690, owner, 0);
//! assert_eq!(digest.to_hex().len(), 66);
//! ```

pub mod crypto;
mod error;
pub mod types;

pub use error::{IoidError, Result};
pub use types::*;
