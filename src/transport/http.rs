//! reqwest-backed HTTP transport
//!
//! [`HttpTransport`] wraps a [`reqwest::Client`] configured from
//! [`Config`]: the per-request timeout, every CA certificate in
//! `ca_certs` added as a trusted root, and certificate verification turned
//! off when `skip_tls_validation` is set.
//!
//! reqwest failures are mapped onto [`TransportError`] from their typed
//! causes. A [`rustls::Error`] found anywhere in the source chain, including
//! one wrapped in an [`io::Error`] by the TLS stream, marks a trust failure
//! and is reported as [`TransportError::UntrustedCertificate`].

use std::error::Error as StdError;
use std::io;
use std::time::Duration;

use url::Url;

use crate::config::Config;
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};

/// PEM armour every CA entry must contain.
const PEM_CERTIFICATE_MARKER: &str = "-----BEGIN CERTIFICATE-----";

/// reqwest-backed [`Transport`].
///
/// Clone is cheap; the inner client shares its connection pool.
///
/// # Examples
///
/// ```
/// use credhub_cli::config::Config;
/// use credhub_cli::transport::http::HttpTransport;
///
/// let config = Config {
///     auth_url: "https://uaa.example.com".to_string(),
///     ..Config::default()
/// };
/// let transport = HttpTransport::new(&config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a transport from the TLS and timeout settings in `config`.
    ///
    /// No network I/O is performed at construction time.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidCaCertificate`] when an entry in
    /// `ca_certs` is not a PEM certificate, and [`TransportError::Other`] if
    /// the TLS backend cannot be initialised.
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let mut builder =
            reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_seconds));

        for (index, pem) in config.ca_certs.iter().enumerate() {
            if !pem.contains(PEM_CERTIFICATE_MARKER) {
                return Err(TransportError::InvalidCaCertificate(format!(
                    "CA certificate #{} is not PEM encoded",
                    index + 1
                )));
            }
            let certificate = reqwest::Certificate::from_pem(pem.as_bytes()).map_err(|e| {
                TransportError::InvalidCaCertificate(format!(
                    "CA certificate #{}: {}",
                    index + 1,
                    error_chain(&e)
                ))
            })?;
            builder = builder.add_root_certificate(certificate);
        }

        if config.skip_tls_validation {
            tracing::warn!("TLS certificate validation is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|e| {
            if config.ca_certs.is_empty() {
                TransportError::Other(error_chain(&e))
            } else {
                TransportError::InvalidCaCertificate(error_chain(&e))
            }
        })?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        tracing::debug!(method = %method, url = %url, "Sending HTTP request");

        let target = Url::parse(&url).map_err(|e| {
            TransportError::Other(format!("invalid request URL '{}': {}", url, e))
        })?;

        let mut builder = self.client.request(method, target);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        tracing::debug!(status, "Received HTTP response");
        Ok(HttpResponse { status, body })
    }
}

/// Maps a reqwest failure onto the matching [`TransportError`] variant.
///
/// Certificate failures surface as connect errors in reqwest, so trust is
/// checked before `is_connect`.
fn classify(err: reqwest::Error) -> TransportError {
    let detail = error_chain(&err);
    if err.is_timeout() {
        TransportError::Timeout(detail)
    } else if is_certificate_failure(&err) {
        TransportError::UntrustedCertificate(detail)
    } else if err.is_connect() {
        TransportError::Connect(detail)
    } else {
        TransportError::Other(detail)
    }
}

/// Returns `true` if any error in the chain is a rustls trust failure.
fn is_certificate_failure(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(inner) = current {
        if let Some(tls) = as_rustls_error(inner) {
            return matches!(
                tls,
                rustls::Error::InvalidCertificate(_) | rustls::Error::NoCertificatesPresented
            );
        }
        current = inner.source();
    }
    false
}

// io::Error::source skips the wrapped error itself, so it is unwrapped here.
fn as_rustls_error<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a rustls::Error> {
    if let Some(tls) = err.downcast_ref::<rustls::Error>() {
        return Some(tls);
    }
    let inner = err.downcast_ref::<io::Error>()?.get_ref()?;
    as_rustls_error(inner)
}

/// Joins an error and all of its sources with `": "`.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !rendered.contains(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = inner.source();
    }
    rendered
}
