//! HTTP transport abstraction and implementations
//!
//! This module defines the [`Transport`] trait that the authentication
//! core sends its requests through. Concrete implementations live in
//! submodules:
//!
//! - [`http::HttpTransport`] -- reqwest-backed client honouring the CA
//!   bundle and TLS settings from [`Config`](crate::config::Config).
//! - [`fake::FakeTransport`] -- in-process fake used in tests (cfg(test)
//!   only).
//!
//! # Design
//!
//! The [`Transport`] trait is intentionally minimal: callers `send` a fully
//! built [`HttpRequest`] and get back either an [`HttpResponse`] or a
//! [`TransportError`]. A response is returned for every HTTP status; only
//! failures to complete the exchange (DNS, connect, TLS, timeout) are
//! errors. Interpreting the status is the caller's job.

use std::fmt;

use thiserror::Error;

pub use reqwest::Method;

/// Failure to complete an HTTP exchange with the remote server.
///
/// These errors describe the connection, never the server's answer. They
/// are surfaced verbatim by the authentication core so the CLI layer can
/// classify them (see [`CredhubError`](crate::error::CredhubError)).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// A configured CA certificate could not be used.
    #[error("no valid CA certificate: {0}")]
    InvalidCaCertificate(String),

    /// The server presented a certificate that failed verification.
    #[error("TLS certificate verification failed: {0}")]
    UntrustedCertificate(String),

    /// DNS resolution or TCP connection failed.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Any other transport-level failure.
    #[error("transport error: {0}")]
    Other(String),
}

/// An outbound HTTP request.
///
/// Built with a small fluent API:
///
/// ```
/// use credhub_cli::transport::{HttpRequest, Method};
///
/// let request = HttpRequest::new(Method::GET, "https://uaa.example.com/info")
///     .header("Accept", "application/json");
///
/// assert_eq!(request.header_value("accept"), Some("application/json"));
/// assert!(request.body.is_none());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Target URL, exactly as the caller joined it.
    ///
    /// It is not validated here. Implementations that need an absolute URL
    /// reject anything else as a [`TransportError`].
    pub url: String,
    /// Headers in insertion order.
    pub headers: Vec<(String, String)>,
    /// Optional request body.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Creates a request with no headers and no body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Appends a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the request body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the first value for `name`, compared case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// Authorization values carry client secrets.
impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(n, v)| {
                if n.eq_ignore_ascii_case("authorization") {
                    (n.as_str(), "[redacted]")
                } else {
                    (n.as_str(), v.as_str())
                }
            })
            .collect();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body", &self.body)
            .finish()
    }
}

/// A completed HTTP exchange: status code and the full body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Abstraction over sending an HTTP request.
///
/// Implementations must be shareable across tasks; the authentication core
/// holds them as `Arc<dyn Transport>`. Timeouts, TLS trust and connection
/// pooling are the implementation's concern.
#[async_trait::async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends `request` and waits for the complete response.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no HTTP response could be obtained.
    /// Non-2xx statuses are NOT errors at this layer.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

pub mod http;

#[cfg(test)]
pub mod fake;
