//! `ioid device` - Show the device's DID and DID document.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::DeviceArgs;

pub async fn execute(ctx: Context, args: DeviceArgs) -> Result<()> {
    let client = ctx.device_client();
    let identity = client.fetch_identity().await?;

    if args.json {
        let mut out = serde_json::json!({ "did": identity.did.as_str() });
        if let Some(key) = &identity.public_key {
            out["publicKey"] = serde_json::json!(key);
        }
        if args.doc {
            out["diddoc"] = client.fetch_document().await?;
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("DID:     {}", identity.did.to_string().cyan());
    println!("Address: {}", identity.address());
    if let Some(key) = &identity.public_key {
        println!("Key hint: {key} (advisory only)");
    }
    if args.doc {
        let doc = client.fetch_document().await?;
        println!("{}", serde_json::to_string_pretty(&doc)?);
    }
    Ok(())
}
