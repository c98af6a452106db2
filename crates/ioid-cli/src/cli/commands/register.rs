//! `ioid register` - Run the full device registration workflow.

use anyhow::{Context as _, Result};
use colored::Colorize;
use dialoguer::Confirm;
use ioid::{Address, Registrar};

use super::Context;
use crate::cli::args::RegisterArgs;

pub async fn execute(ctx: Context, args: RegisterArgs) -> Result<()> {
    let wallet = ctx.wallet()?;
    let registrar = Registrar::new(
        ctx.device_client(),
        ctx.ipfs_client()?,
        ctx.chain_client(),
        wallet,
        ctx.registry()?,
    );

    let nft_contract: Address = args
        .nft
        .parse()
        .with_context(|| format!("bad NFT contract address `{}`", args.nft))?;
    let owner = match args.owner.as_deref() {
        Some(raw) => raw.parse().with_context(|| format!("bad owner address `{raw}`"))?,
        None => registrar.owner(),
    };

    println!("Fetching device information from {}...", ctx.device_url);
    let device = registrar.fetch_device().await?;
    println!("  DID:    {}", device.did.to_string().cyan());
    println!("  Owner:  {owner}");
    println!("  Token:  {} #{}", args.nft, args.token_id);

    if !args.yes {
        let proceed = Confirm::new()
            .with_prompt("Register this device?")
            .default(true)
            .interact()?;
        if !proceed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let outcome = registrar
        .register(&device, owner, nft_contract, args.token_id)
        .await?;

    println!();
    println!("{}", "Registration confirmed!".green().bold());
    println!("  Transaction: {}", outcome.receipt.transaction_hash.cyan());
    println!("  Block:       {}", outcome.receipt.block_number);
    println!("  Document:    {}", outcome.document_uri);
    Ok(())
}
