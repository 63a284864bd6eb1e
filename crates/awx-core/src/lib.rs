#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod health;
pub mod pagination;
#[doc(hidden)]
pub mod prelude;
pub mod requester;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use health::{ServiceHealth, ServiceStatus};
pub use pagination::{ListResponse, Pagination};
#[cfg(feature = "test-utils")]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use requester::MockRequester;
pub use requester::{
    ApiRequest, ApiResponse, Method, QueryParams, Requester, RequesterService, check_response,
};
