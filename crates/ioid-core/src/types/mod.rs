//! Strongly-typed protocol values.

mod address;
mod device;
mod registration;

pub use address::Address;
pub use device::{DeviceIdentity, Did, DidDocument, DID_PREFIX};
pub use registration::{Digest, RecoveredSignature, TxReceipt};
