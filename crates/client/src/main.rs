//! `arena` binary.
//!
//! Loads configuration from the environment (and `.env`), assembles the
//! [`Client`] and runs one subcommand. The result is printed to stdout as JSON;
//! failures exit with a non-zero status.

use std::process::ExitCode;

use anyhow::Result;
use arena_client::{Cli, Client, ClientConfig, logging};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::debug!(store = %config.store, "starting arena client");
    let client = Client::builder().config(config).build().await?;

    let outcome = cli.command.execute(client.service()).await?;
    println!("{}", serde_json::to_string_pretty(&outcome.body)?);

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
