//! Workflow job template nodes and the edges between them.
//!
//! A workflow job template is a DAG whose vertices are nodes. Each node runs
//! one unified job template and points at its children through `success`,
//! `failure` and `always` edges.

mod relation;
mod service;
mod types;

use awx_core::ListResponse;

pub use self::relation::{NodeRelation, RelationType};
pub use self::service::{ENDPOINT, WorkflowJobTemplateNodeService};
pub use self::types::{
    CreateWorkflowJobTemplateNode, UpdateWorkflowJobTemplateNode, WorkflowJobTemplateNode,
};

/// Tracing target for workflow job template node operations.
pub const TRACING_TARGET: &str = "awx_client::workflow_job_template_node";

/// One page of workflow job template nodes.
pub type ListWorkflowJobTemplateNodesResponse = ListResponse<WorkflowJobTemplateNode>;
