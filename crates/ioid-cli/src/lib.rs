//! # ioid-cli
//!
//! Command-line interface for registering IoT devices with the ioID registry.
//!
//! ## Commands
//!
//! - **register**: run the full registration workflow for the configured device
//! - **device**: show the device's DID and DID document
//! - **sign-digest**: have the device sign an arbitrary digest and print v/r/s
//! - **nft**: device NFT helpers (ownership reads, registry approval)

pub mod cli;

pub use cli::run;
