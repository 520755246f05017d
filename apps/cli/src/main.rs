//! ContentFlow CLI: ask the content assistant and render its replies.
//!
//! Replies are resolved against a catalog snapshot so content links become
//! buttons (or "not found" notices) instead of raw URLs.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
