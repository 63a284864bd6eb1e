//! Health reporting for AWX API endpoints.

use std::time::Duration;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Represents the operational status of the API.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceStatus {
    /// API answered the ping endpoint successfully
    #[default]
    Healthy,
    /// API did not answer or answered with an error
    Unhealthy,
}

/// Health information for an API endpoint.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Current status
    pub status: ServiceStatus,
    /// Round trip time of the health check
    pub response: Option<Duration>,
    /// Optional message describing the current state
    pub message: Option<String>,
    /// Server version reported by the ping endpoint
    pub version: Option<String>,
    /// Timestamp when the health check was performed
    pub checked_at: Timestamp,
}

impl ServiceHealth {
    /// Creates a new healthy report.
    pub fn healthy() -> Self {
        Self {
            status: ServiceStatus::Healthy,
            checked_at: Timestamp::now(),
            ..Default::default()
        }
    }

    /// Creates a new unhealthy report.
    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: ServiceStatus::Unhealthy,
            message: Some(message.into()),
            checked_at: Timestamp::now(),
            ..Default::default()
        }
    }

    /// Sets the response time for this health check.
    pub fn with_response_time(mut self, response_time: Duration) -> Self {
        self.response = Some(response_time);
        self
    }

    /// Sets the server version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Returns true if the status is healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_healthy_report() {
        let health = ServiceHealth::healthy()
            .with_response_time(Duration::from_millis(12))
            .with_version("24.6.1");

        assert!(health.is_healthy());
        assert!(health.message.is_none());
        assert_eq!(health.response, Some(Duration::from_millis(12)));
        assert_eq!(health.version.as_deref(), Some("24.6.1"));
    }

    #[test]
    fn test_unhealthy_report() {
        let health = ServiceHealth::unhealthy("ping returned HTTP 503");

        assert!(!health.is_healthy());
        assert_eq!(health.status, ServiceStatus::Unhealthy);
        assert_eq!(health.message.as_deref(), Some("ping returned HTTP 503"));
    }

    #[test]
    fn test_status_serializes_by_name() {
        let names: Vec<_> = [ServiceStatus::Healthy, ServiceStatus::Unhealthy]
            .iter()
            .map(|status| serde_json::to_string(status).unwrap())
            .collect();
        assert_eq!(names, [r#""Healthy""#, r#""Unhealthy""#]);
    }
}
