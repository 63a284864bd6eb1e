//! CLI configuration.
//!
//! ```text
//! Cli
//! ├── awx: ReqwestConfig   # Server URL, credentials, timeouts
//! └── command: Command     # Resource subcommand
//! ```
//!
//! Connection settings can be given as flags or environment variables:
//!
//! ```bash
//! awx --awx-url https://awx.example.com --awx-token "$TOKEN" nodes get 31
//! AWX_URL=https://awx.example.com AWX_TOKEN="$TOKEN" awx nodes get 31
//! ```

use std::io;

use awx_client::ReqwestConfig;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::TRACING_TARGET_CONFIG;
use crate::command::Command;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "awx")]
#[command(about = "Manage AWX workflow job template nodes")]
#[command(version)]
pub struct Cli {
    /// AWX connection configuration.
    #[clap(flatten)]
    pub awx: ReqwestConfig,

    /// Operation to perform.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Loads the .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is read first so clap's `env` fallbacks see its values.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing on stderr, leaving stdout for command output.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }

    /// Logs the connection settings without secrets.
    pub fn log_config(&self) {
        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            base_url = %self.awx.base_url,
            username = ?self.awx.username,
            has_token = self.awx.token.is_some(),
            timeout_secs = self.awx.http_timeout,
            insecure = self.awx.insecure,
            features = ?enabled_features(),
            "AWX connection configuration"
        );
    }
}

/// Returns a list of enabled compile-time features.
fn enabled_features() -> Vec<&'static str> {
    [cfg!(feature = "dotenv").then_some("dotenv")]
        .into_iter()
        .flatten()
        .collect()
}
