//! `awx nodes` subcommands.

use anyhow::{Context, bail};
use awx_client::{
    AwxClient, CreateWorkflowJobTemplateNode, QueryParams, RelationType,
    UpdateWorkflowJobTemplateNode, WorkflowJobTemplateNodeService,
};
use clap::{Args, Subcommand};
use serde_json::{Map, Value, json};

use crate::TRACING_TARGET_COMMAND;

/// Prompted launch parameters shared by `create` and `update`.
#[derive(Debug, Clone, Default, Args)]
pub struct PromptArgs {
    /// Inventory used when the node runs
    #[arg(long)]
    pub inventory: Option<i64>,

    /// Host limit used when the node runs
    #[arg(long)]
    pub limit: Option<String>,

    /// Extra variables as a JSON object
    #[arg(long, value_parser = parse_json_object)]
    pub extra_data: Option<Map<String, Value>>,

    /// Run only after every parent reached the matching outcome
    #[arg(long)]
    pub all_parents_must_converge: Option<bool>,
}

/// Operations on workflow job template nodes.
#[derive(Debug, Clone, Subcommand)]
pub enum NodesCommand {
    /// Show a node
    Get {
        /// Node id
        id: i64,
    },

    /// List nodes
    List {
        /// Page number to fetch
        #[arg(long)]
        page: Option<u32>,

        /// Number of nodes per page
        #[arg(long)]
        page_size: Option<u32>,

        /// Full-text search term
        #[arg(long)]
        search: Option<String>,

        /// Field to order results by
        #[arg(long)]
        order_by: Option<String>,

        /// Follow `next` links and print every node
        #[arg(long)]
        all: bool,
    },

    /// Create a node
    Create {
        /// Workflow job template the node belongs to
        #[arg(long)]
        workflow_job_template: Option<i64>,

        /// Template the node runs
        #[arg(long)]
        unified_job_template: Option<i64>,

        /// Key unique within the workflow
        #[arg(long)]
        identifier: Option<String>,

        #[command(flatten)]
        prompts: PromptArgs,
    },

    /// Update fields of a node
    Update {
        /// Node id
        id: i64,

        /// Template the node runs
        #[arg(long)]
        unified_job_template: Option<i64>,

        /// Key unique within the workflow
        #[arg(long)]
        identifier: Option<String>,

        #[command(flatten)]
        prompts: PromptArgs,
    },

    /// Delete a node
    Delete {
        /// Node id
        id: i64,
    },

    /// Add an edge between two nodes
    Associate {
        /// Parent node id
        source: i64,
        /// Child node id
        target: i64,
        /// Edge kind: success, failure or always
        #[arg(long, default_value = "success")]
        relation: RelationType,
    },

    /// Remove an edge between two nodes
    Disassociate {
        /// Parent node id
        source: i64,
        /// Child node id
        target: i64,
        /// Edge kind: success, failure or always
        #[arg(long, default_value = "success")]
        relation: RelationType,
    },

    /// List the children of a node along one edge kind
    Related {
        /// Node id
        id: i64,
        /// Edge kind: success, failure or always
        relation: RelationType,
    },
}

impl NodesCommand {
    /// Runs the command and returns the value to print.
    pub async fn execute(self, client: &AwxClient) -> anyhow::Result<Value> {
        let nodes = client.workflow_job_template_nodes();

        let value = match self {
            Self::Get { id } => {
                let node = nodes
                    .get_by_id(id, &QueryParams::new())
                    .await
                    .with_context(|| format!("failed to get node {id}"))?;
                serde_json::to_value(node)?
            }
            Self::List {
                page,
                page_size,
                search,
                order_by,
                all,
            } => {
                let mut params = QueryParams::new();
                if let Some(page) = page {
                    params.insert("page", page);
                }
                if let Some(page_size) = page_size {
                    params.insert("page_size", page_size);
                }
                if let Some(search) = search {
                    params.insert("search", search);
                }
                if let Some(order_by) = order_by {
                    params.insert("order_by", order_by);
                }

                if all {
                    list_all(&nodes, params).await?
                } else {
                    let page = nodes.list(&params).await.context("failed to list nodes")?;
                    serde_json::to_value(page)?
                }
            }
            Self::Create {
                workflow_job_template,
                unified_job_template,
                identifier,
                prompts,
            } => {
                let payload = CreateWorkflowJobTemplateNode {
                    workflow_job_template,
                    unified_job_template,
                    identifier,
                    inventory: prompts.inventory,
                    limit: prompts.limit,
                    extra_data: prompts.extra_data,
                    all_parents_must_converge: prompts.all_parents_must_converge,
                    ..Default::default()
                };
                let node = nodes
                    .create(&payload, &QueryParams::new())
                    .await
                    .context("failed to create node")?;
                serde_json::to_value(node)?
            }
            Self::Update {
                id,
                unified_job_template,
                identifier,
                prompts,
            } => {
                let update = UpdateWorkflowJobTemplateNode {
                    unified_job_template,
                    identifier,
                    inventory: prompts.inventory,
                    limit: prompts.limit,
                    extra_data: prompts.extra_data,
                    all_parents_must_converge: prompts.all_parents_must_converge,
                    ..Default::default()
                };
                if update.is_empty() {
                    bail!("nothing to update for node {id}");
                }
                let node = nodes
                    .update(id, &update, &QueryParams::new())
                    .await
                    .with_context(|| format!("failed to update node {id}"))?;
                serde_json::to_value(node)?
            }
            Self::Delete { id } => {
                let echoed = nodes
                    .delete(id)
                    .await
                    .with_context(|| format!("failed to delete node {id}"))?;
                match echoed {
                    Some(node) => serde_json::to_value(node)?,
                    None => json!({"deleted": id}),
                }
            }
            Self::Associate {
                source,
                target,
                relation,
            } => {
                nodes
                    .associate_node_relationship(source, target, relation)
                    .await
                    .with_context(|| format!("failed to associate {source} -> {target}"))?;
                json!({"source": source, "target": target, "relation": relation.as_str()})
            }
            Self::Disassociate {
                source,
                target,
                relation,
            } => {
                nodes
                    .disassociate_node_relationship(source, target, relation)
                    .await
                    .with_context(|| format!("failed to disassociate {source} -> {target}"))?;
                json!({
                    "source": source,
                    "target": target,
                    "relation": relation.as_str(),
                    "disassociate": true
                })
            }
            Self::Related { id, relation } => {
                let related = nodes
                    .get_node_relationships(id, relation)
                    .await
                    .with_context(|| format!("failed to list {relation} nodes of {id}"))?;
                serde_json::to_value(related)?
            }
        };

        Ok(value)
    }
}

/// Walks `next` links from the requested page and returns every node.
async fn list_all(
    nodes: &WorkflowJobTemplateNodeService,
    mut params: QueryParams,
) -> anyhow::Result<Value> {
    let mut results = Vec::new();
    let mut current = params.get("page").and_then(|page| page.parse().ok()).unwrap_or(1u32);

    loop {
        let page = nodes
            .list(&params)
            .await
            .with_context(|| format!("failed to list nodes, page {current}"))?;
        let next = page.pagination.next_page();
        results.extend(page.into_results());

        let Some(next) = next else { break };
        if next <= current {
            bail!("server returned a non-advancing next page ({next} after {current})");
        }

        tracing::debug!(
            target: TRACING_TARGET_COMMAND,
            page = next,
            fetched = results.len(),
            "Following next page"
        );

        current = next;
        params.insert("page", next);
    }

    Ok(serde_json::to_value(results)?)
}

fn parse_json_object(value: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("expected a JSON object".to_owned()),
        Err(err) => Err(err.to_string()),
    }
}
