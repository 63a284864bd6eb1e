//! Subcommands.

mod nodes;

use awx_client::AwxClient;
use clap::Subcommand;
use serde_json::Value;

pub use self::nodes::NodesCommand;

/// Resource to operate on.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Workflow job template nodes and their edges.
    #[command(subcommand)]
    Nodes(NodesCommand),
}

impl Command {
    /// Runs the command and returns the value to print.
    pub async fn execute(self, client: &AwxClient) -> anyhow::Result<Value> {
        match self {
            Self::Nodes(command) => command.execute(client).await,
        }
    }
}
