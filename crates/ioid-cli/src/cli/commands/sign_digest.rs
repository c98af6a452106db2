//! `ioid sign-digest` - Have the device sign an arbitrary digest and print
//! the disambiguated signature components.

use anyhow::Result;
use ioid::crypto::disambiguate;
use ioid::Digest;

use super::Context;
use crate::cli::args::SignDigestArgs;

pub async fn execute(ctx: Context, args: SignDigestArgs) -> Result<()> {
    let digest: Digest = args.digest.parse()?;
    let client = ctx.device_client();

    let identity = client.fetch_identity().await?;
    let raw = client.request_signature(&digest).await?;
    let signature = disambiguate(&digest, &raw, identity.address())?;

    println!("v: 0x{:02x}", signature.v);
    println!("r: {}", signature.r_hex());
    println!("s: {}", signature.s_hex());
    Ok(())
}
