//! Per-call request parameters.

use crate::{Error, Result};
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

/// Describes one API call: verb, path relative to the base URL, query,
/// extra headers and an optional JSON payload.
///
/// Built once per call with the consuming setters below and then handed to
/// [`Client::do_request`](crate::Client::do_request) by reference.
///
/// # Examples
/// ```
/// use postmark_client::Parameters;
///
/// # fn main() -> Result<(), postmark_client::Error> {
/// let params = Parameters::post("email")
///     .query("dry_run", "true")
///     .json(&serde_json::json!({ "From": "sender@example.com" }))?;
/// assert_eq!(params.path, "email");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Parameters {
    /// HTTP verb.
    pub method: Method,
    /// Path relative to the client's base URL, e.g. `"email/batch"`.
    pub path: String,
    /// Query string pairs, appended in order.
    pub query: Vec<(String, String)>,
    /// Extra headers; these override the client's defaults.
    pub headers: HeaderMap,
    /// Serialized JSON body.
    pub payload: Option<Vec<u8>>,
}

impl Parameters {
    /// Parameters for `method` on `path`, with no query, headers or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            payload: None,
        }
    }

    /// Shorthand for a `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Shorthand for a `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Shorthand for a `PUT` request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Shorthand for a `DELETE` request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query string pair.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set an extra header for this call.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Serialize `payload` as the JSON request body.
    ///
    /// # Errors
    /// Returns [`Error::Encode`] if `payload` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self> {
        let body = serde_json::to_vec(payload).map_err(Error::Encode)?;
        self.payload = Some(body);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn shorthands_set_method_and_path() {
        assert_eq!(Parameters::get("server").method, Method::GET);
        assert_eq!(Parameters::post("email").method, Method::POST);
        assert_eq!(Parameters::put("server").method, Method::PUT);
        assert_eq!(Parameters::delete("templates/1").method, Method::DELETE);

        let params = Parameters::post("email/batch");
        assert_eq!(params.path, "email/batch");
        assert!(params.query.is_empty());
        assert!(params.headers.is_empty());
        assert!(params.payload.is_none());
    }

    #[test]
    fn query_pairs_keep_insertion_order() {
        let params = Parameters::get("messages/outbound")
            .query("count", "50")
            .query("offset", "0");
        assert_eq!(
            params.query,
            vec![
                ("count".to_string(), "50".to_string()),
                ("offset".to_string(), "0".to_string()),
            ]
        );
    }

    #[test]
    fn json_serializes_payload() {
        let params = Parameters::post("email")
            .json(&serde_json::json!({ "Subject": "Hello" }))
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(params.payload.as_deref().unwrap()).unwrap();
        assert_eq!(body["Subject"], "Hello");
    }

    #[test]
    fn json_reports_encode_errors() {
        // Non-string map keys cannot be represented in JSON.
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], "value");
        let err = Parameters::post("email").json(&map).unwrap_err();
        assert!(matches!(err, Error::Encode(_)));
    }

    #[test]
    fn header_is_stored() {
        let params = Parameters::get("server").header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("abc"),
        );
        assert_eq!(params.headers.get("x-request-id").unwrap(), "abc");
    }
}
