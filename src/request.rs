//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::method::Method;

/// An incoming HTTP request with its body fully buffered.
///
/// The server builds one per hyper request; tests build them directly:
///
/// ```rust
/// use todos::{Method, Request};
///
/// let req = Request::new(Method::Post, "/api/v1/todos")
///     .with_body(r#"{"title":"Learn Rust"}"#);
/// assert_eq!(req.body(), br#"{"title":"Learn Rust"}"#);
/// ```
#[derive(Debug)]
pub struct Request {
    method: Method,
    path: String,
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), body: Bytes::new(), params: HashMap::new() }
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub(crate) fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Returns a named path parameter.
    ///
    /// For a route `/todos/{id}`, `req.param("id")` on `/todos/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Deserializes the body as JSON. Unknown fields are ignored.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
