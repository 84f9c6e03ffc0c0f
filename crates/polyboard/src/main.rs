//! Polyboard - command-line entry point.

use anyhow::Result;
use clap::Parser;
use polyboard::{AppConfig, Cli, Command, run_console, run_tui, variant_lines};
use polyboard_core::VariantRegistry;
use polyboard_variants::ReferenceEngine;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = cli.overlay(AppConfig::load_or_default(&cli.config)?);
    config.validate()?;

    match cli.command.unwrap_or_default() {
        Command::Tui => run_tui(config).await,
        Command::Console => run_console(config).await,
        Command::Variants => list_variants(),
    }
}

/// Prints the variant catalog.
fn list_variants() -> Result<()> {
    let registry = VariantRegistry::from_engine(&ReferenceEngine)?;
    for line in variant_lines(&registry) {
        println!("{}", line);
    }
    Ok(())
}
