//! Workflow job template node service.

use awx_core::{Error, ListResponse, QueryParams, RequesterService, Result};
use validator::Validate;

use super::{
    CreateWorkflowJobTemplateNode, NodeRelation, RelationType, TRACING_TARGET,
    UpdateWorkflowJobTemplateNode, WorkflowJobTemplateNode,
};

/// Collection endpoint of the node resource.
pub const ENDPOINT: &str = "/api/v2/workflow_job_template_nodes/";

/// Service for the `workflow_job_template_nodes` resource.
///
/// Every method performs exactly one request through the shared
/// [`RequesterService`] and returns the first error it meets. Non-2xx
/// statuses are classified by [`ApiResponse::check`].
///
/// [`ApiResponse::check`]: awx_core::ApiResponse::check
#[derive(Debug, Clone)]
pub struct WorkflowJobTemplateNodeService {
    requester: RequesterService,
}

impl WorkflowJobTemplateNodeService {
    /// Creates a service on top of a shared requester.
    pub fn new(requester: RequesterService) -> Self {
        Self { requester }
    }

    fn node_path(id: i64) -> String {
        format!("{ENDPOINT}{id}/")
    }

    fn relation_path(id: i64, relation: RelationType) -> String {
        format!("{ENDPOINT}{id}/{relation}/")
    }

    /// Retrieves a single node.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NotFound`](awx_core::ErrorKind::NotFound) when the
    /// node does not exist.
    pub async fn get_by_id(&self, id: i64, params: &QueryParams) -> Result<WorkflowJobTemplateNode> {
        let response = self.requester.get(Self::node_path(id), params).await?;
        response.check()?;
        response.json()
    }

    /// Retrieves one page of nodes.
    ///
    /// Use [`QueryParams::page`] and [`Pagination::next_page`] to walk the
    /// remaining pages.
    ///
    /// [`Pagination::next_page`]: awx_core::Pagination::next_page
    pub async fn list(&self, params: &QueryParams) -> Result<ListResponse<WorkflowJobTemplateNode>> {
        let response = self.requester.get(ENDPOINT, params).await?;
        response.check()?;
        let page: ListResponse<WorkflowJobTemplateNode> = response.json()?;

        tracing::debug!(
            target: TRACING_TARGET,
            count = page.count(),
            returned = page.len(),
            has_next = page.pagination.has_next(),
            "Listed workflow job template nodes"
        );

        Ok(page)
    }

    /// Creates a node.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidInput`](awx_core::ErrorKind::InvalidInput)
    /// naming every missing mandatory field, without sending anything.
    pub async fn create(
        &self,
        data: &CreateWorkflowJobTemplateNode,
        params: &QueryParams,
    ) -> Result<WorkflowJobTemplateNode> {
        if let Err(errors) = data.validate() {
            let mut missing: Vec<_> = errors
                .field_errors()
                .into_keys()
                .map(|field| field.to_string())
                .collect();
            missing.sort();

            tracing::warn!(
                target: TRACING_TARGET,
                missing = ?missing,
                "Rejected workflow job template node payload"
            );

            return Err(Error::invalid_input()
                .with_message(format!("missing mandatory fields: {}", missing.join(", ")))
                .with_source(errors));
        }

        let response = self.requester.post(ENDPOINT, data, params).await?;
        response.check()?;
        let node: WorkflowJobTemplateNode = response.json()?;

        tracing::info!(
            target: TRACING_TARGET,
            node_id = node.id,
            identifier = %node.identifier,
            "Created workflow job template node"
        );

        Ok(node)
    }

    /// Partially updates a node.
    ///
    /// Only the members set on `data` are sent.
    pub async fn update(
        &self,
        id: i64,
        data: &UpdateWorkflowJobTemplateNode,
        params: &QueryParams,
    ) -> Result<WorkflowJobTemplateNode> {
        let response = self
            .requester
            .patch(Self::node_path(id), data, params)
            .await?;
        response.check()?;
        response.json()
    }

    /// Deletes a node.
    ///
    /// AWX answers `204 No Content`, in which case `None` is returned. A
    /// server that echoes the deleted node yields `Some`.
    pub async fn delete(&self, id: i64) -> Result<Option<WorkflowJobTemplateNode>> {
        let response = self.requester.delete(Self::node_path(id)).await?;
        response.check()?;

        tracing::info!(
            target: TRACING_TARGET,
            node_id = id,
            "Deleted workflow job template node"
        );

        response.json_opt()
    }

    /// Adds an edge from `source` to `target`.
    pub async fn associate_node_relationship(
        &self,
        source: i64,
        target: i64,
        relation: RelationType,
    ) -> Result<()> {
        self.post_relation(source, relation, NodeRelation::associate(target))
            .await
    }

    /// Removes the edge from `source` to `target`.
    ///
    /// Whether the edge existed is left to the server.
    pub async fn disassociate_node_relationship(
        &self,
        source: i64,
        target: i64,
        relation: RelationType,
    ) -> Result<()> {
        self.post_relation(source, relation, NodeRelation::disassociate(target))
            .await
    }

    /// Lists the nodes reached from `id` through edges of `relation`.
    ///
    /// Only the first page of the sub-resource is returned. A node with more
    /// children than the server's page size yields a truncated list; use
    /// [`list`](Self::list) with a filter to walk every page.
    pub async fn get_node_relationships(
        &self,
        id: i64,
        relation: RelationType,
    ) -> Result<Vec<WorkflowJobTemplateNode>> {
        let response = self
            .requester
            .get(Self::relation_path(id, relation), &QueryParams::new())
            .await?;
        response.check()?;
        let page: ListResponse<WorkflowJobTemplateNode> = response.json()?;
        Ok(page.into_results())
    }

    async fn post_relation(
        &self,
        source: i64,
        relation: RelationType,
        body: NodeRelation,
    ) -> Result<()> {
        let response = self
            .requester
            .post(Self::relation_path(source, relation), &body, &QueryParams::new())
            .await?;
        response.check()?;

        tracing::debug!(
            target: TRACING_TARGET,
            source_id = source,
            target_id = body.id,
            %relation,
            disassociate = body.disassociate,
            "Updated node relationship"
        );

        Ok(())
    }
}
