//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};

/// Default IoTeX testnet Babel RPC endpoint
pub const DEFAULT_PROVIDER_URL: &str = "https://babel-api.testnet.iotex.io";

/// Published ioID registry deployment on the IoTeX testnet
pub const DEFAULT_REGISTRY_ADDRESS: &str = "0x0A7e595C7889dF3652A19aF52C18377bF17e027D";

/// Default device service URL on a typical LAN setup
pub const DEFAULT_DEVICE_URL: &str = "https://192.168.1.1:8000";

/// Register IoT devices with the ioID identity registry
///
/// Binds a device's self-asserted DID to an on-chain ioID, backed by a
/// signature the device itself produces over a replay-protected digest.
#[derive(Parser, Debug)]
#[command(name = "ioid")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Ledger JSON-RPC endpoint
    #[arg(long, env = "IOID_PROVIDER_URL", global = true, default_value = DEFAULT_PROVIDER_URL)]
    pub provider_url: String,

    /// ioID registry contract address
    #[arg(long, env = "IOID_REGISTRY_ADDRESS", global = true, default_value = DEFAULT_REGISTRY_ADDRESS)]
    pub registry: String,

    /// Device service URL (self-signed certificates are accepted)
    #[arg(long, env = "IOID_DEVICE_URL", global = true, default_value = DEFAULT_DEVICE_URL)]
    pub device_url: String,

    /// IPFS upload gateway URL
    #[arg(long, env = "IOID_IPFS_URL", global = true)]
    pub ipfs_url: Option<String>,

    /// Owner private key as hex (prefer the env var over the flag)
    #[arg(long, env = "IOID_PRIVATE_KEY", global = true, hide_env_values = true)]
    pub private_key: Option<String>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register the device with the ioID registry
    Register(RegisterArgs),

    /// Show the device's DID and DID document
    Device(DeviceArgs),

    /// Have the device sign a 32-byte digest and print v/r/s
    SignDigest(SignDigestArgs),

    /// Device NFT helpers
    Nft(NftArgs),
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Device NFT contract address
    #[arg(long)]
    pub nft: String,

    /// Token id bound to this device
    #[arg(long)]
    pub token_id: u64,

    /// Registration owner (defaults to the wallet address)
    #[arg(long)]
    pub owner: Option<String>,

    /// Skip the interactive confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct DeviceArgs {
    /// Also fetch and print the DID document
    #[arg(long)]
    pub doc: bool,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SignDigestArgs {
    /// The 32-byte digest to sign, as 0x-prefixed hex
    pub digest: String,
}

#[derive(Args, Debug)]
pub struct NftArgs {
    #[command(subcommand)]
    pub command: NftCommands,
}

#[derive(Subcommand, Debug)]
pub enum NftCommands {
    /// Show the owner of a token
    OwnerOf {
        /// Device NFT contract address
        #[arg(long)]
        contract: String,
        /// Token id
        #[arg(long)]
        token_id: u64,
    },

    /// Show how many tokens an address holds
    BalanceOf {
        /// Device NFT contract address
        #[arg(long)]
        contract: String,
        /// Holder address (defaults to the wallet address)
        #[arg(long)]
        owner: Option<String>,
    },

    /// Approve the registry (or another spender) to transfer a token
    Approve {
        /// Device NFT contract address
        #[arg(long)]
        contract: String,
        /// Token id
        #[arg(long)]
        token_id: u64,
        /// Spender address (defaults to the registry)
        #[arg(long)]
        spender: Option<String>,
    },
}
