//! Request dispatching.
//!
//! This module defines the seam between resource services and the transport:
//! - [`Requester`]: Core trait every transport implements
//! - [`RequesterService`]: Cloneable wrapper with observability
//!
//! For the HTTP implementation, see the `awx-reqwest` crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use awx_core::requester::{QueryParams, RequesterService};
//!
//! let service = RequesterService::new(my_requester);
//! let response = service.get("/api/v2/ping/", &QueryParams::new()).await?;
//! response.check()?;
//! ```

#[cfg(any(test, feature = "test-utils"))]
mod mock;
mod request;
mod response;
mod service;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use mock::MockRequester;
pub use request::{ApiRequest, Method, QueryParams};
pub use response::{ApiResponse, check_response};
pub use service::RequesterService;

pub use crate::{Result, ServiceHealth};

/// Tracing target for request dispatching.
pub const TRACING_TARGET: &str = "awx_core::requester";

/// Core trait for sending requests to the AWX API.
///
/// Implementations perform exactly one round trip per call and report
/// transport failures as errors. Non-success statuses are returned as a
/// normal [`ApiResponse`]; classifying them is [`check_response`]'s job.
#[async_trait::async_trait]
pub trait Requester: Send + Sync {
    /// Sends a request and returns the raw response.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;

    /// Performs a health check against the API.
    async fn health_check(&self) -> Result<ServiceHealth>;
}
