//! The `pico` binary.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use pico_cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    pico_cli::run(cli).await?;
    Ok(())
}
