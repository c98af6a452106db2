//! Pure protocol computations: hashing, ABI encoding, digest construction,
//! signature disambiguation, and transaction signing. No I/O.

pub mod abi;
mod digest;
mod keccak;
mod signature;
mod tx;
mod wallet;

pub use digest::permit_digest;
pub use keccak::{address_from_pubkey, keccak256, selector};
pub use signature::disambiguate;
pub use tx::LegacyTransaction;
pub use wallet::Wallet;
