#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod command;
mod config;

use std::process;

use anyhow::Context;
use awx_client::AwxClient;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "awx_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "awx_cli::config";
pub const TRACING_TARGET_COMMAND: &str = "awx_cli::command";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_STARTUP,
            error = format!("{error:#}"),
            "command failed"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    tracing::debug!(
        target: TRACING_TARGET_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        pid = process::id(),
        "starting awx cli"
    );
    cli.log_config();

    let client = AwxClient::from_config(cli.awx).context("invalid AWX configuration")?;
    let output = cli.command.execute(&client).await?;

    let rendered = serde_json::to_string_pretty(&output).context("failed to render output")?;
    println!("{rendered}");

    Ok(())
}
