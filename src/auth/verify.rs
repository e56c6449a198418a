//! Authorization server connection check
//!
//! Sends a single `GET {auth_url}/info` and reports whether the exchange
//! completed. The response itself is not interpreted: any status and any
//! body count as reachable and trusted. Transport errors are returned
//! exactly as the transport produced them.

use crate::auth::{endpoint, AuthError};
use crate::config::Config;
use crate::transport::{HttpRequest, Method, Transport};

/// Path of the unauthenticated info endpoint used as the probe target.
pub const INFO_PATH: &str = "/info";

/// Confirms the authorization server is reachable over a trusted connection.
///
/// # Errors
///
/// - [`AuthError::InvalidUrl`] if `config.auth_url` is empty.
/// - [`AuthError::Transport`] wrapping the transport's error unmodified
///   (DNS failure, refused connection, certificate rejected, no valid CA).
///
/// # Examples
///
/// ```no_run
/// use credhub_cli::auth::verify_auth_server_connection;
/// use credhub_cli::config::Config;
/// use credhub_cli::transport::http::HttpTransport;
///
/// # async fn example() -> credhub_cli::error::Result<()> {
/// let config = Config {
///     auth_url: "https://uaa.example.com:8443".to_string(),
///     ..Config::default()
/// };
/// let transport = HttpTransport::new(&config)?;
/// verify_auth_server_connection(&transport, &config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn verify_auth_server_connection(
    transport: &dyn Transport,
    config: &Config,
) -> Result<(), AuthError> {
    let url = endpoint(&config.auth_url, INFO_PATH)?;
    let request = HttpRequest::new(Method::GET, url).header("Accept", "application/json");

    tracing::debug!(url = %request.url, "Verifying auth server connection");

    match transport.send(request).await {
        Ok(response) => {
            tracing::debug!(status = response.status, "Auth server reachable");
            Ok(())
        }
        Err(e) => {
            tracing::debug!(error = %e, "Auth server connection failed");
            Err(AuthError::Transport(e))
        }
    }
}
