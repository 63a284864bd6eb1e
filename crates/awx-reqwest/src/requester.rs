//! Requester implementation.
//!
//! This module implements the [`Requester`] trait for [`ReqwestClient`].

use std::time::Instant;

use awx_core::{ApiRequest, ApiResponse, Method, Requester, ServiceHealth};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;

use crate::client::ReqwestClient;
use crate::error::Error;
use crate::{PING_PATH, TRACING_TARGET};

/// Body of the ping endpoint; only the fields used for health reports.
#[derive(Debug, Deserialize)]
struct Ping {
    #[serde(default)]
    version: Option<String>,
}

fn http_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait::async_trait]
impl Requester for ReqwestClient {
    async fn send(&self, request: ApiRequest) -> awx_core::Result<ApiResponse> {
        let url = self.endpoint(&request.path)?;

        tracing::trace!(
            target: TRACING_TARGET,
            method = %request.method,
            url = %url,
            "Dispatching request"
        );

        let mut http_request = self
            .http()
            .request(http_method(request.method), url)
            .header(ACCEPT, "application/json");

        if !request.query.is_empty() {
            http_request = http_request.query(&request.query);
        }

        if let Some(body) = request.body {
            http_request = http_request
                .header(CONTENT_TYPE, "application/json")
                .body(body);
        }

        let http_response = self
            .authorize(http_request)
            .send()
            .await
            .map_err(Error::from)?;

        let status = http_response.status().as_u16();
        let body = http_response.bytes().await.map_err(Error::from)?;

        Ok(ApiResponse::new(status, body))
    }

    async fn health_check(&self) -> awx_core::Result<ServiceHealth> {
        let started_at = Instant::now();
        let result = self.send(ApiRequest::get(PING_PATH)).await;
        let elapsed = started_at.elapsed();

        let health = match result {
            Ok(response) if response.is_success() => {
                let health = ServiceHealth::healthy().with_response_time(elapsed);
                match response.json::<Ping>().ok().and_then(|ping| ping.version) {
                    Some(version) => health.with_version(version),
                    None => health,
                }
            }
            Ok(response) => {
                ServiceHealth::unhealthy(format!("ping returned HTTP {}", response.status))
                    .with_response_time(elapsed)
            }
            Err(error) => ServiceHealth::unhealthy(error.to_string()),
        };

        tracing::debug!(
            target: TRACING_TARGET,
            status = ?health.status,
            elapsed_ms = elapsed.as_millis(),
            "Health check completed"
        );

        Ok(health)
    }
}

#[cfg(test)]
mod tests {
    use awx_core::{ErrorKind, QueryParams, ServiceStatus};
    use serde_json::json;
    use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

    use super::*;
    use crate::ReqwestConfig;

    fn client_for(server: &MockServer, config: ReqwestConfig) -> ReqwestClient {
        let config = ReqwestConfig {
            base_url: server.uri(),
            ..config
        };
        ReqwestClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_get_with_basic_auth_and_query() {
        let server = MockServer::start().await;

        Mock::given(matchers::method("GET"))
            .and(matchers::path("/api/v2/workflow_job_template_nodes/"))
            .and(matchers::query_param("page", "2"))
            .and(matchers::header("authorization", "Basic YWRtaW46c2VjcmV0"))
            .and(matchers::header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(
            &server,
            ReqwestConfig::default().with_basic_auth("admin", "secret"),
        );
        let request = ApiRequest::get("/api/v2/workflow_job_template_nodes/")
            .with_query(QueryParams::new().page(2));

        let response = client.send(request).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.json::<serde_json::Value>().unwrap(), json!({"count": 0}));
    }

    #[tokio::test]
    async fn test_token_takes_precedence() {
        let server = MockServer::start().await;

        Mock::given(matchers::method("GET"))
            .and(matchers::header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(
            &server,
            ReqwestConfig::default()
                .with_basic_auth("admin", "secret")
                .with_token("tok-123"),
        );

        let response = client.send(ApiRequest::get("/api/v2/me/")).await.unwrap();
        assert_eq!(response.status, 200);
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/api/v2/workflow_job_template_nodes/5/success/"))
            .and(matchers::header("content-type", "application/json"))
            .and(matchers::body_json(json!({"id": 9})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, ReqwestConfig::default());
        let request = ApiRequest::post("/api/v2/workflow_job_template_nodes/5/success/")
            .with_json(&json!({"id": 9}))
            .unwrap();

        let response = client.send(request).await.unwrap();
        assert_eq!(response.status, 204);
    }

    #[tokio::test]
    async fn test_error_status_is_returned_not_raised() {
        let server = MockServer::start().await;

        Mock::given(matchers::method("DELETE"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
            .mount(&server)
            .await;

        let client = client_for(&server, ReqwestConfig::default());
        let response = client
            .send(ApiRequest::delete("/api/v2/workflow_job_template_nodes/1/"))
            .await
            .unwrap();

        assert_eq!(response.status, 404);
        assert_eq!(response.check().unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        let client = ReqwestClient::new(ReqwestConfig::new("http://127.0.0.1:1")).unwrap();
        let error = client
            .send(ApiRequest::get("/api/v2/ping/"))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NetworkError);
    }

    #[tokio::test]
    async fn test_health_check_reports_version() {
        let server = MockServer::start().await;

        Mock::given(matchers::method("GET"))
            .and(matchers::path(PING_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"version": "24.6.1", "ha": false})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, ReqwestConfig::default());
        let health = client.health_check().await.unwrap();

        assert_eq!(health.status, ServiceStatus::Healthy);
        assert_eq!(health.version.as_deref(), Some("24.6.1"));
        assert!(health.response.is_some());
    }

    #[tokio::test]
    async fn test_health_check_unhealthy_on_error_status() {
        let server = MockServer::start().await;

        Mock::given(matchers::method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server, ReqwestConfig::default());
        let health = client.health_check().await.unwrap();

        assert_eq!(health.status, ServiceStatus::Unhealthy);
        assert!(health.message.unwrap().contains("503"));
    }
}
