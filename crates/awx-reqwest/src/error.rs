//! Internal error types for awx-reqwest.

use thiserror::Error;

/// Result type alias for awx-reqwest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for awx-reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// URL could not be parsed or joined.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<Error> for awx_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    awx_core::Error::timeout()
                        .with_message(e.to_string())
                        .with_source(e)
                } else if e.is_connect() {
                    awx_core::Error::network_error()
                        .with_message("Connection failed")
                        .with_source(e)
                } else if e.is_builder() {
                    awx_core::Error::configuration()
                        .with_message(e.to_string())
                        .with_source(e)
                } else {
                    awx_core::Error::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Serde(e) => awx_core::Error::serialization()
                .with_message(e.to_string())
                .with_source(e),
            Error::Url(e) => awx_core::Error::configuration()
                .with_message(e.to_string())
                .with_source(e),
            Error::Config(message) => awx_core::Error::configuration().with_message(message),
        }
    }
}
