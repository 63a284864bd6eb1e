//! Entry point holding the shared requester.

use awx_core::{Requester, RequesterService, Result, ServiceHealth};

use crate::TRACING_TARGET;
use crate::workflow_job_template_node::WorkflowJobTemplateNodeService;

/// Client for the AWX API.
///
/// Cloning is cheap: every clone and every service it hands out share the
/// same [`RequesterService`].
#[derive(Debug, Clone)]
pub struct AwxClient {
    requester: RequesterService,
}

impl AwxClient {
    /// Creates a client on top of an existing requester service.
    pub fn new(requester: RequesterService) -> Self {
        Self { requester }
    }

    /// Creates a client from any [`Requester`] implementation.
    pub fn from_provider<R>(provider: R) -> Self
    where
        R: Requester + 'static,
    {
        Self::new(RequesterService::new(provider))
    }

    /// Creates a client backed by an authenticated reqwest dispatcher.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](awx_core::ErrorKind::Configuration) error
    /// if the configuration is invalid.
    #[cfg(feature = "reqwest")]
    #[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
    pub fn from_config(config: awx_reqwest::ReqwestConfig) -> Result<Self> {
        let client = awx_reqwest::ReqwestClient::new(config)?;
        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %client.base_url(),
            "Created AWX client"
        );
        Ok(Self::new(client.into_service()))
    }

    /// Returns the shared requester.
    pub fn requester(&self) -> &RequesterService {
        &self.requester
    }

    /// Returns the workflow job template node service.
    pub fn workflow_job_template_nodes(&self) -> WorkflowJobTemplateNodeService {
        WorkflowJobTemplateNodeService::new(self.requester.clone())
    }

    /// Checks that the API is reachable.
    pub async fn health_check(&self) -> Result<ServiceHealth> {
        let health = self.requester.health_check().await?;
        tracing::debug!(
            target: TRACING_TARGET,
            status = ?health.status,
            version = ?health.version,
            "AWX health check completed"
        );
        Ok(health)
    }
}

#[cfg(test)]
mod tests {
    use awx_core::{ApiResponse, MockRequester, QueryParams, ServiceStatus};

    use super::*;
    use crate::RelationType;

    #[tokio::test]
    async fn test_services_share_requester() {
        let mock = MockRequester::new()
            .with_response(ApiResponse::empty(204))
            .with_response(ApiResponse::empty(204));
        let client = AwxClient::from_provider(mock.clone());

        client
            .workflow_job_template_nodes()
            .associate_node_relationship(1, 2, RelationType::Success)
            .await
            .unwrap();
        client
            .clone()
            .workflow_job_template_nodes()
            .delete(2)
            .await
            .unwrap();

        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_health_check_delegates() {
        let client = AwxClient::new(MockRequester::new().into_service());
        let health = client.health_check().await.unwrap();
        assert_eq!(health.status, ServiceStatus::Healthy);
    }

    #[tokio::test]
    async fn test_requester_is_exposed() {
        let mock = MockRequester::new().with_json(200, serde_json::json!({"version": "24.6.1"}));
        let client = AwxClient::from_provider(mock.clone());

        let response = client
            .requester()
            .get("/api/v2/ping/", &QueryParams::new())
            .await
            .unwrap();
        assert!(response.is_success());
        assert_eq!(mock.last_request().unwrap().path, "/api/v2/ping/");
    }
}
