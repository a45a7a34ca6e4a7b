//! Outgoing request descriptor.
//!
//! This is what authentication strategies and interceptors mutate before the
//! (external) transport dispatches the request. It is owned by the call that
//! is about to send it.

use std::collections::BTreeMap;

use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Method;
use serde_json::Value;

/// Transport-level username/password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl core::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Request about to be handed to the transport.
///
/// `headers` and `query` are optional aspects: a strategy that needs one which is
/// absent leaves the request untouched for that aspect.
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    pub method: Method,
    pub uri: String,
    pub headers: Option<HeaderMap>,
    pub query: Option<BTreeMap<String, String>>,
    /// Credentials the transport should send as HTTP basic auth.
    pub auth: Option<BasicCredentials>,
    pub body: Option<Value>,
}

impl OutgoingRequest {
    /// Request with empty header and query maps.
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            headers: Some(HeaderMap::new()),
            query: Some(BTreeMap::new()),
            auth: None,
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Header value as text; `None` when absent or not visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.as_ref()?.get(name)?.to_str().ok()
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.as_ref()?.get(name).map(String::as_str)
    }

    /// Set a header, replacing any previous value.
    ///
    /// Returns `false` (and leaves the request unchanged) when the request has no
    /// header map or the name/value cannot be represented on the wire.
    pub fn set_header(&mut self, name: &str, value: &str) -> bool {
        match self.headers.as_mut() {
            Some(headers) => insert_header(headers, name, value, false),
            None => false,
        }
    }
}

/// Insert a header, logging and skipping names or values that are not valid HTTP.
pub(crate) fn insert_header(headers: &mut HeaderMap, name: &str, value: &str, sensitive: bool) -> bool {
    insert_header_bytes(headers, name, value.as_bytes(), sensitive)
}

/// [`insert_header`] for values that are not necessarily UTF-8 (opaque header bytes).
pub(crate) fn insert_header_bytes(
    headers: &mut HeaderMap,
    name: &str,
    value: &[u8],
    sensitive: bool,
) -> bool {
    let Ok(name) = HeaderName::from_bytes(name.as_bytes()) else {
        tracing::warn!(header = name, "skipping header with invalid name");
        return false;
    };
    let Ok(mut value) = HeaderValue::from_bytes(value) else {
        tracing::warn!(header = %name, "skipping header with invalid value");
        return false;
    };
    value.set_sensitive(sensitive);
    headers.insert(name, value);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_request_has_empty_maps() {
        let req = OutgoingRequest::new(Method::POST, "http://localhost:7042/v2/user/read");
        assert!(req.headers.as_ref().is_some_and(HeaderMap::is_empty));
        assert!(req.query.as_ref().is_some_and(BTreeMap::is_empty));
        assert!(req.auth.is_none());
    }

    #[test]
    fn header_names_are_case_insensitive() {
        let mut req = OutgoingRequest::new(Method::GET, "/ping");
        assert!(req.set_header("X-Request-Id", "abc"));
        assert_eq!(req.header("x-request-id"), Some("abc"));
    }

    #[test]
    fn invalid_headers_are_skipped() {
        let mut req = OutgoingRequest::new(Method::GET, "/ping");
        assert!(!req.set_header("bad header", "x"));
        assert!(!req.set_header("x-ok", "line\nbreak"));
        assert!(req.headers.as_ref().is_some_and(HeaderMap::is_empty));
    }

    #[test]
    fn missing_header_map_is_a_no_op() {
        let mut req = OutgoingRequest::new(Method::GET, "/ping");
        req.headers = None;
        assert!(!req.set_header("x-ok", "1"));
        assert_eq!(req.header("x-ok"), None);
    }

    #[test]
    fn basic_credentials_debug_hides_password() {
        let creds = BasicCredentials {
            username: "client".into(),
            password: "hunter2".into(),
        };
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("client"));
        assert!(!rendered.contains("hunter2"));
    }
}
