//! Authorization server access
//!
//! This module talks to the OAuth2 authorization server that guards the
//! secret-management API. It covers two single-shot operations:
//!
//! - [`token`]  -- exchange client credentials for an access token
//!   (`client_credentials` grant).
//! - [`verify`] -- probe the server to confirm it is reachable and presents
//!   a trusted TLS identity.
//!
//! Both take their [`Transport`](crate::transport::Transport) and
//! [`Config`](crate::config::Config) explicitly and keep no state between
//! calls: no token cache, no session, no retry.

pub mod token;
pub mod verify;

pub use token::{AuthTokenClient, ClientCredential, Token};
pub use verify::verify_auth_server_connection;

use thiserror::Error;

use crate::transport::TransportError;

/// Maximum length for response bodies carried in error messages.
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Errors produced by the authorization server operations.
///
/// Transport failures are kept apart from protocol failures so callers can
/// tell "server unreachable or untrusted" from "server answered but
/// rejected the request".
#[derive(Error, Debug)]
pub enum AuthError {
    /// The request never completed. The wrapped error is passed through
    /// exactly as the transport returned it.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// No auth URL is configured.
    #[error("invalid auth server URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL as configured
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The token endpoint answered with a status other than 200.
    #[error("token endpoint returned status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        body: String,
    },

    /// The token endpoint answered 200 with a body that is not a token.
    #[error("failed to decode token response")]
    Decode(#[from] serde_json::Error),
}

impl AuthError {
    /// Returns `true` when the failure happened below HTTP.
    pub fn is_transport(&self) -> bool {
        matches!(self, AuthError::Transport(_))
    }

    /// The HTTP status for [`AuthError::UnexpectedStatus`].
    pub fn status(&self) -> Option<u16> {
        match self {
            AuthError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn unexpected_status(status: u16, body: &str) -> Self {
        AuthError::UnexpectedStatus {
            status,
            body: truncate_body(body),
        }
    }
}

/// Builds `{auth_url}{path}`, trimming trailing slashes from `auth_url`.
///
/// Only an unset URL is rejected here. Whether the result is a usable
/// target is left to the transport.
pub(crate) fn endpoint(auth_url: &str, path: &str) -> Result<String, AuthError> {
    let base = auth_url.trim();
    if base.is_empty() {
        return Err(AuthError::InvalidUrl {
            url: auth_url.to_string(),
            reason: "auth server URL is not set".to_string(),
        });
    }

    Ok(format!("{}{}", base.trim_end_matches('/'), path))
}

/// Truncate a response body to avoid logging excessive data
fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!(
        "{}... (truncated, {} total bytes)",
        &body[..end],
        body.len()
    )
}
