//! Reqwest client configuration.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default AWX server address.
pub const DEFAULT_BASE_URL: &str = "http://localhost";

/// Connection settings for the AWX API.
///
/// Authentication uses the OAuth2 token when set, otherwise basic
/// authentication when both username and password are set.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ReqwestConfig {
    /// Base URL of the AWX server
    #[cfg_attr(
        feature = "config",
        arg(long = "awx-url", env = "AWX_URL", default_value = DEFAULT_BASE_URL)
    )]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Username for basic authentication
    #[cfg_attr(feature = "config", arg(long = "awx-username", env = "AWX_USERNAME"))]
    #[serde(default)]
    pub username: Option<String>,

    /// Password for basic authentication
    #[cfg_attr(
        feature = "config",
        arg(long = "awx-password", env = "AWX_PASSWORD", hide_env_values = true)
    )]
    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    /// OAuth2 token, takes precedence over basic authentication
    #[cfg_attr(
        feature = "config",
        arg(long = "awx-token", env = "AWX_TOKEN", hide_env_values = true)
    )]
    #[serde(default, skip_serializing)]
    pub token: Option<String>,

    /// HTTP request timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "http-timeout", env = "HTTP_TIMEOUT", default_value = "30")
    )]
    #[serde(default = "default_timeout_secs")]
    pub http_timeout: u64,

    /// User-Agent header to send with requests
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "HTTP_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Accept invalid TLS certificates
    #[cfg_attr(feature = "config", arg(long = "awx-insecure", env = "AWX_INSECURE"))]
    #[serde(default)]
    pub insecure: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl fmt::Debug for ReqwestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("has_password", &self.password.is_some())
            .field("has_token", &self.token.is_some())
            .field("http_timeout", &self.http_timeout)
            .field("user_agent", &self.user_agent)
            .field("insecure", &self.insecure)
            .finish()
    }
}

impl Default for ReqwestConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: None,
            password: None,
            token: None,
            http_timeout: default_timeout_secs(),
            user_agent: None,
            insecure: false,
        }
    }
}

impl ReqwestConfig {
    /// Create a new configuration for the given server.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Returns the timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.http_timeout == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.http_timeout)
        }
    }

    /// Returns the effective user agent, using default if not set.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(Self::default_user_agent)
    }

    /// Returns the default user agent string.
    fn default_user_agent() -> String {
        format!("awx-rs/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Parses the base URL.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "base url must be an http(s) url: {}",
                self.base_url
            )));
        }
        Ok(url)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.parsed_base_url()?;
        match (&self.username, &self.password) {
            (Some(_), None) => Err(Error::Config("username is set without a password".into())),
            (None, Some(_)) => Err(Error::Config("password is set without a username".into())),
            _ => Ok(()),
        }
    }

    /// Set basic authentication credentials.
    #[must_use]
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the OAuth2 token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.http_timeout = timeout_secs;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Accept invalid TLS certificates.
    #[must_use]
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }
}
