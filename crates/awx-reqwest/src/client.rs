//! Reqwest-based HTTP client for the AWX API.

use std::sync::Arc;

use awx_core::RequesterService;
use reqwest::{Client, RequestBuilder};
use url::Url;

use super::{ReqwestConfig, TRACING_TARGET};
use crate::error::Result;

/// Inner client that holds the HTTP client and configuration.
struct ReqwestClientInner {
    http: Client,
    base_url: Url,
    config: ReqwestConfig,
}

/// Reqwest-based dispatcher for the AWX API.
///
/// This client implements the [`Requester`] trait: it joins request paths onto
/// the configured base URL, attaches authentication and returns the raw
/// response for the caller to classify.
///
/// # Examples
///
/// ```rust,ignore
/// use awx_reqwest::{ReqwestClient, ReqwestConfig};
///
/// let config = ReqwestConfig::new("https://awx.example.com").with_token(token);
/// let client = ReqwestClient::new(config)?;
///
/// let service = client.into_service();
/// let response = service.get("/api/v2/ping/", &Default::default()).await?;
/// ```
///
/// [`Requester`]: awx_core::Requester
#[derive(Clone)]
pub struct ReqwestClient {
    inner: Arc<ReqwestClientInner>,
}

impl std::fmt::Debug for ReqwestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestClient {
    /// Creates a new reqwest client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: ReqwestConfig) -> Result<Self> {
        let timeout = config.effective_timeout();
        let user_agent = config.effective_user_agent();

        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %config.base_url,
            timeout_ms = timeout.as_millis(),
            insecure = config.insecure,
            "Creating reqwest client"
        );

        config.validate()?;
        let base_url = config.parsed_base_url()?;

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&user_agent)
            .danger_accept_invalid_certs(config.insecure)
            .build()?;

        let inner = ReqwestClientInner {
            http,
            base_url,
            config,
        };
        let client = Self {
            inner: Arc::new(inner),
        };

        tracing::info!(
            target: TRACING_TARGET,
            base_url = %client.inner.base_url,
            "Reqwest client created successfully"
        );

        Ok(client)
    }

    /// Creates a new reqwest client with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ReqwestConfig::default())
    }

    /// Gets the underlying HTTP client.
    pub(crate) fn http(&self) -> &Client {
        &self.inner.http
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ReqwestConfig {
        &self.inner.config
    }

    /// Gets the parsed base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Converts this client into a [`RequesterService`] for use with dependency injection.
    pub fn into_service(self) -> RequesterService {
        RequesterService::new(self)
    }

    /// Resolves a server-relative path against the base URL.
    ///
    /// Any path prefix of the base URL is kept, so AWX behind a reverse proxy
    /// at `https://host/awx` resolves `/api/v2/` to `https://host/awx/api/v2/`.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// Attaches the configured credentials to a request.
    pub(crate) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let config = &self.inner.config;
        if let Some(token) = &config.token {
            return request.bearer_auth(token);
        }
        match (&config.username, &config.password) {
            (Some(username), password) => request.basic_auth(username, password.as_ref()),
            _ => request,
        }
    }
}
