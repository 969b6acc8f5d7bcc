//! Binary crate for the `skystage` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Hosting the terminal scene and its frame loop

use clap::Parser;

mod cli;
mod terminal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cmd = cli::Cli::parse();
    cmd.run().await
}
