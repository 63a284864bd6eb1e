//! API response envelope and status classification.

use std::borrow::Cow;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::{Error, ErrorKind, Result};

/// Longest body excerpt carried in an error message.
const MAX_ERROR_BODY: usize = 512;

/// Raw answer from the AWX API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Undecoded response body.
    pub body: Bytes,
}

impl ApiResponse {
    /// Creates a response from a status and body.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a response with an empty body.
    pub fn empty(status: u16) -> Self {
        Self::new(status, Bytes::new())
    }

    /// Creates a response whose body is `value` encoded as JSON.
    pub fn json_value(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true if the body is empty or whitespace only.
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Returns the body as text, replacing invalid UTF-8.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Classifies a non-success status into an error.
    ///
    /// The message carries AWX's `detail` field when present, otherwise a
    /// truncated copy of the body.
    pub fn check(&self) -> Result<()> {
        if self.is_success() {
            return Ok(());
        }

        let error = Error::from_status(self.status);
        match self.error_detail() {
            Some(detail) => Err(error.with_message(detail)),
            None => Err(error),
        }
    }

    /// Deserializes the body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|err| {
            Error::from_source(ErrorKind::Serialization, err)
                .with_message("failed to deserialize response body")
        })
    }

    /// Deserializes the body, treating an empty body as `None`.
    pub fn json_opt<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        if self.is_empty() {
            return Ok(None);
        }
        self.json().map(Some)
    }

    fn error_detail(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        if let Ok(serde_json::Value::Object(object)) = serde_json::from_slice(&self.body)
            && let Some(serde_json::Value::String(detail)) = object.get("detail")
        {
            return Some(detail.clone());
        }

        Some(self.text().chars().take(MAX_ERROR_BODY).collect())
    }
}

/// Classifies a non-success response into an error.
///
/// Equivalent to [`ApiResponse::check`].
pub fn check_response(response: &ApiResponse) -> Result<()> {
    response.check()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_success_passes_check() {
        assert!(check_response(&ApiResponse::empty(200)).is_ok());
        assert!(check_response(&ApiResponse::empty(204)).is_ok());
    }

    #[test]
    fn test_not_found_uses_detail() {
        let response = ApiResponse::json_value(404, &json!({"detail": "Not found."}));
        let error = response.check().unwrap_err();

        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.status(), Some(404));
        assert_eq!(error.message.as_deref(), Some("Not found."));
    }

    #[test]
    fn test_bad_request_keeps_field_errors() {
        let response =
            ApiResponse::json_value(400, &json!({"identifier": ["This field is required."]}));
        let error = response.check().unwrap_err();

        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert!(error.message.unwrap().contains("This field is required."));
    }

    #[test]
    fn test_error_body_is_truncated() {
        let response = ApiResponse::new(500, "x".repeat(4096));
        let error = response.check().unwrap_err();

        assert_eq!(error.kind(), ErrorKind::ApiError);
        assert_eq!(error.message.unwrap().len(), MAX_ERROR_BODY);
    }

    #[test]
    fn test_json_opt_on_empty_body() {
        let response = ApiResponse::empty(204);
        let value: Option<serde_json::Value> = response.json_opt().unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_json_invalid_body() {
        let response = ApiResponse::new(200, "<html>");
        let error = response.json::<serde_json::Value>().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Serialization);
    }
}
