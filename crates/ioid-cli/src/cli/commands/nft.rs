//! `ioid nft` - Device NFT helpers.

use anyhow::{Context as _, Result};
use colored::Colorize;
use ioid::{Address, DeviceNft};

use super::Context;
use crate::cli::args::{NftArgs, NftCommands};

fn parse(label: &str, raw: &str) -> Result<Address> {
    raw.parse().with_context(|| format!("bad {label} address `{raw}`"))
}

pub async fn execute(ctx: Context, args: NftArgs) -> Result<()> {
    match args.command {
        NftCommands::OwnerOf { contract, token_id } => {
            let nft = DeviceNft::new(ctx.chain_client(), parse("contract", &contract)?);
            let owner = nft.owner_of(token_id).await?;
            println!("{owner}");
        }
        NftCommands::BalanceOf { contract, owner } => {
            let nft = DeviceNft::new(ctx.chain_client(), parse("contract", &contract)?);
            let holder = match owner.as_deref() {
                Some(raw) => parse("owner", raw)?,
                None => ctx.wallet()?.address(),
            };
            let balance = nft.balance_of(holder).await?;
            println!("{balance}");
        }
        NftCommands::Approve {
            contract,
            token_id,
            spender,
        } => {
            let wallet = ctx.wallet()?;
            let nft = DeviceNft::new(ctx.chain_client(), parse("contract", &contract)?);
            let spender = match spender.as_deref() {
                Some(raw) => parse("spender", raw)?,
                None => ctx.registry()?,
            };
            let receipt = nft.approve(&wallet, spender, token_id).await?;
            println!("{}", "Approval confirmed!".green().bold());
            println!("  Transaction: {}", receipt.transaction_hash.cyan());
        }
    }
    Ok(())
}
