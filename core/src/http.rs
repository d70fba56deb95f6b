//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `OuraClient` builds `HttpRequest`
//! values and parses `HttpResponse` values; executing the request belongs to
//! an `HttpGetter`, which the caller supplies. The getter is expected to
//! attach transport-level concerns (TLS, timeouts, connection reuse) itself.
//!
//! The API is read-only, so every request is a GET and carries no body.

use crate::error::TransportError;

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute URL without the query string.
    pub path: String,
    /// Unencoded query parameters, in the order they should be sent.
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes a GET request and returns the raw response.
///
/// Non-2xx statuses must be returned as `Ok`; only failures that produced
/// no response at all are `TransportError`s.
pub trait HttpGetter {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<F> HttpGetter for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError>,
{
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self(request)
    }
}
