//! Reqwest-based request dispatcher for the AWX API.
//!
//! This crate provides [`ReqwestClient`], the HTTP implementation of
//! [`awx_core::Requester`].
//!
//! # Example
//!
//! ```rust,ignore
//! use awx_reqwest::{ReqwestClient, ReqwestConfig};
//! use awx_core::RequesterService;
//!
//! let config = ReqwestConfig::new("https://awx.example.com")
//!     .with_basic_auth("admin", "password");
//! let client = ReqwestClient::new(config)?;
//!
//! // Convert to a service for dependency injection
//! let service: RequesterService = client.into_service();
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod client;
mod config;
mod error;
mod requester;

pub use crate::client::ReqwestClient;
pub use crate::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, ReqwestConfig};
pub use crate::error::{Error, Result};

/// Tracing target for reqwest client operations.
pub const TRACING_TARGET: &str = "awx_reqwest::client";

/// Path of the unauthenticated ping endpoint used for health checks.
pub const PING_PATH: &str = "/api/v2/ping/";
