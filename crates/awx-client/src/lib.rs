#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
pub mod workflow_job_template_node;

pub use awx_core::{Error, ErrorKind, ListResponse, Pagination, QueryParams, Result};
#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
pub use awx_reqwest::{ReqwestClient, ReqwestConfig};
pub use client::AwxClient;
pub use workflow_job_template_node::{
    CreateWorkflowJobTemplateNode, ListWorkflowJobTemplateNodesResponse, NodeRelation,
    RelationType, UpdateWorkflowJobTemplateNode, WorkflowJobTemplateNode,
    WorkflowJobTemplateNodeService,
};

/// Tracing target for client-level operations.
pub const TRACING_TARGET: &str = "awx_client";
