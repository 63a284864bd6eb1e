//! Commonly used items from awx-core.
//!
//! # Usage
//!
//! ```rust,ignore
//! use awx_core::prelude::*;
//! ```

// Mock requester (test-utils feature)
#[cfg(feature = "test-utils")]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use crate::requester::MockRequester;
// Request dispatching
pub use crate::requester::{
    ApiRequest, ApiResponse, Method, QueryParams, Requester, RequesterService, check_response,
};
pub use crate::{
    BoxedError, Error, ErrorKind, ListResponse, Pagination, Result, ServiceHealth, ServiceStatus,
};
