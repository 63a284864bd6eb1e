//! Requester service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use super::{ApiRequest, ApiResponse, QueryParams, Requester, Result, TRACING_TARGET};
use crate::ServiceHealth;

/// Requester wrapper with observability.
///
/// Resource services hold one of these. The inner requester is wrapped in
/// `Arc`, so cloning is cheap and clones share the same transport.
#[derive(Clone)]
pub struct RequesterService {
    inner: Arc<dyn Requester>,
}

impl fmt::Debug for RequesterService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequesterService").finish_non_exhaustive()
    }
}

impl RequesterService {
    /// Create a new requester service wrapper.
    pub fn new<R>(requester: R) -> Self
    where
        R: Requester + 'static,
    {
        Self {
            inner: Arc::new(requester),
        }
    }

    /// Sends a request, logging its outcome.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let started_at = Instant::now();
        let method = request.method;
        let path = request.path.clone();

        tracing::debug!(
            target: TRACING_TARGET,
            %method,
            path = %path,
            query_params = request.query.len(),
            has_body = request.body.is_some(),
            "Sending API request"
        );

        let result = self.inner.send(request).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(response) if response.is_success() => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    %method,
                    path = %path,
                    status = response.status,
                    elapsed_ms = elapsed.as_millis(),
                    "API request completed"
                );
            }
            Ok(response) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    %method,
                    path = %path,
                    status = response.status,
                    elapsed_ms = elapsed.as_millis(),
                    "API request returned non-success status"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    %method,
                    path = %path,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "API request failed"
                );
            }
        }

        result
    }

    /// Sends a GET request.
    pub async fn get(&self, path: impl Into<String>, query: &QueryParams) -> Result<ApiResponse> {
        let request = ApiRequest::get(path).with_query(query.clone());
        self.send(request).await
    }

    /// Serializes `body` and sends a POST request.
    pub async fn post<T>(
        &self,
        path: impl Into<String>,
        body: &T,
        query: &QueryParams,
    ) -> Result<ApiResponse>
    where
        T: Serialize + Sync + ?Sized,
    {
        let request = ApiRequest::post(path)
            .with_query(query.clone())
            .with_json(body)?;
        self.send(request).await
    }

    /// Serializes `body` and sends a PATCH request.
    pub async fn patch<T>(
        &self,
        path: impl Into<String>,
        body: &T,
        query: &QueryParams,
    ) -> Result<ApiResponse>
    where
        T: Serialize + Sync + ?Sized,
    {
        let request = ApiRequest::patch(path)
            .with_query(query.clone())
            .with_json(body)?;
        self.send(request).await
    }

    /// Sends a DELETE request.
    pub async fn delete(&self, path: impl Into<String>) -> Result<ApiResponse> {
        self.send(ApiRequest::delete(path)).await
    }

    /// Performs a health check against the API.
    pub async fn health_check(&self) -> Result<ServiceHealth> {
        self.inner.health_check().await
    }
}
