//! API request envelope.

use std::collections::BTreeMap;
use std::collections::btree_map::Iter;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

use crate::{Error, ErrorKind, Result};

/// HTTP methods used by the AWX API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

/// Query string parameters, kept in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    /// Creates an empty set of parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, replacing any previous value for the key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a parameter, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.insert(key.into(), value.to_string());
    }

    /// Returns the value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Selects a page of a list endpoint.
    #[must_use]
    pub fn page(self, page: u32) -> Self {
        self.with("page", page)
    }

    /// Sets the number of results per page.
    #[must_use]
    pub fn page_size(self, page_size: u32) -> Self {
        self.with("page_size", page_size)
    }

    /// Filters list results by a free-text search.
    #[must_use]
    pub fn search(self, term: impl ToString) -> Self {
        self.with("search", term)
    }

    /// Orders list results by a field (prefix with `-` for descending).
    #[must_use]
    pub fn order_by(self, field: impl ToString) -> Self {
        self.with("order_by", field)
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the parameters in key order.
    pub fn iter(&self) -> Iter<'_, String, String> {
        self.0.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type IntoIter = Iter<'a, String, String>;
    type Item = (&'a String, &'a String);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A single call to the AWX API.
///
/// `path` is server-relative (`/api/v2/...`); the dispatcher joins it onto its
/// configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Server-relative path.
    pub path: String,
    /// Query string parameters.
    pub query: QueryParams,
    /// Serialized JSON body.
    pub body: Option<Bytes>,
}

impl ApiRequest {
    /// Creates a request without query or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: None,
        }
    }

    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Creates a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Creates a PATCH request.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    /// Creates a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Sets the query parameters.
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Serializes `payload` as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Serialization`] if the payload cannot be encoded.
    pub fn with_json<T>(mut self, payload: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        let bytes = serde_json::to_vec(payload).map_err(|err| {
            Error::from_source(ErrorKind::Serialization, err)
                .with_message(format!("failed to serialize body for {}", self.path))
        })?;
        self.body = Some(Bytes::from(bytes));
        Ok(self)
    }

    /// Decodes the body as a JSON value, if present and valid.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_ref()
            .and_then(|body| serde_json::from_slice(body).ok())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Patch.as_ref(), "PATCH");
    }

    #[test]
    fn test_query_params_helpers() {
        let params = QueryParams::new()
            .page(2)
            .page_size(50)
            .search("deploy")
            .order_by("-id");

        assert_eq!(params.len(), 4);
        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.get("page_size"), Some("50"));
        assert_eq!(params.get("search"), Some("deploy"));
        assert_eq!(params.get("order_by"), Some("-id"));
    }

    #[test]
    fn test_query_params_from_iter() {
        let params: QueryParams = [("identifier", "build"), ("page", "1")]
            .into_iter()
            .collect();
        let keys: Vec<_> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["identifier", "page"]);
    }

    #[test]
    fn test_with_json_body() {
        let request = ApiRequest::post("/api/v2/workflow_job_template_nodes/5/success/")
            .with_json(&json!({"id": 9}))
            .unwrap();

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.json_body(), Some(json!({"id": 9})));
    }

    #[test]
    fn test_with_json_rejects_non_string_keys() {
        let mut payload = HashMap::new();
        payload.insert((1, 2), "tuple keys are not valid JSON");

        let error = ApiRequest::post("/api/v2/").with_json(&payload).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Serialization);
    }
}
