//! ioid - Register IoT devices with the ioID identity registry.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    ioid_cli::run().await
}
