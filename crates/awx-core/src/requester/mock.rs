//! Recording mock requester for testing.
//!
//! # Feature Flag
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! awx-core = { version = "...", features = ["test-utils"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use awx_core::requester::{ApiResponse, MockRequester};
//!
//! let mock = MockRequester::new().with_response(ApiResponse::empty(204));
//! let service = mock.clone().into_service();
//!
//! service.delete("/api/v2/workflow_job_template_nodes/3/").await?;
//! assert_eq!(mock.request_count(), 1);
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{ApiRequest, ApiResponse, Requester, RequesterService, Result};
use crate::{Error, ServiceHealth};

#[derive(Debug, Default)]
struct MockState {
    requests: Vec<ApiRequest>,
    responses: VecDeque<Result<ApiResponse>>,
}

/// Requester that records requests and replays queued responses.
///
/// Clones share state, so keep one clone for assertions and hand the other
/// to the code under test. When the queue is empty, `send` fails with an
/// [`ErrorKind::Unknown`](crate::ErrorKind::Unknown) error.
#[derive(Debug, Clone, Default)]
pub struct MockRequester {
    state: Arc<Mutex<MockState>>,
}

impl MockRequester {
    /// Creates a mock with an empty response queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    #[must_use]
    pub fn with_response(self, response: ApiResponse) -> Self {
        self.push_response(response);
        self
    }

    /// Queues a JSON response.
    #[must_use]
    pub fn with_json(self, status: u16, body: serde_json::Value) -> Self {
        self.push_response(ApiResponse::json_value(status, &body));
        self
    }

    /// Queues a transport error.
    #[must_use]
    pub fn with_error(self, error: Error) -> Self {
        self.lock().responses.push_back(Err(error));
        self
    }

    /// Queues a response.
    pub fn push_response(&self, response: ApiResponse) {
        self.lock().responses.push_back(Ok(response));
    }

    /// Returns every request sent so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    /// Returns the number of requests sent so far.
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.lock().requests.last().cloned()
    }

    /// Wraps a clone of this mock in a [`RequesterService`].
    pub fn into_service(self) -> RequesterService {
        RequesterService::new(self)
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl Requester for MockRequester {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut state = self.lock();
        let path = request.path.clone();
        state.requests.push(request);
        state.responses.pop_front().unwrap_or_else(|| {
            Err(Error::unknown().with_message(format!("no mock response queued for {path}")))
        })
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        Ok(ServiceHealth::healthy())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;
    use crate::requester::QueryParams;

    #[tokio::test]
    async fn test_records_requests_and_replays_responses() {
        let mock = MockRequester::new()
            .with_json(200, json!({"id": 1}))
            .with_response(ApiResponse::empty(204));
        let service = mock.clone().into_service();

        let first = service.get("/api/v2/a/", &QueryParams::new()).await.unwrap();
        let second = service.delete("/api/v2/b/").await.unwrap();

        assert_eq!(first.status, 200);
        assert_eq!(second.status, 204);
        assert_eq!(mock.request_count(), 2);
        assert_eq!(mock.last_request().unwrap().path, "/api/v2/b/");
    }

    #[tokio::test]
    async fn test_empty_queue_fails() {
        let mock = MockRequester::new();
        let error = mock.send(ApiRequest::get("/api/v2/")).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unknown);
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_queued_error_is_returned() {
        let mock = MockRequester::new().with_error(Error::timeout());
        let error = mock.send(ApiRequest::get("/api/v2/")).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Timeout);
    }
}
