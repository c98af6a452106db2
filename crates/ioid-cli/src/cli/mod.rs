//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    // Create context for commands
    let ctx = commands::Context {
        provider_url: cli.provider_url,
        registry: cli.registry,
        device_url: cli.device_url,
        ipfs_url: cli.ipfs_url,
        private_key: cli.private_key,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Register(args) => commands::register::execute(ctx, args).await,
        Commands::Device(args) => commands::device::execute(ctx, args).await,
        Commands::SignDigest(args) => commands::sign_digest::execute(ctx, args).await,
        Commands::Nft(args) => commands::nft::execute(ctx, args).await,
    }
}
