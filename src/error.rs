//! Error types for credhub-cli
//!
//! This module defines the user-facing error type for the CLI, using
//! `thiserror` for ergonomic error handling. Lower layers keep their own
//! precise errors ([`TransportError`], [`AuthError`]); converting them into
//! [`CredhubError`] is where they get classified into actionable messages.

use thiserror::Error;

use crate::auth::AuthError;
use crate::transport::TransportError;

/// Main error type for credhub-cli operations
#[derive(Error, Debug)]
pub enum CredhubError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catch-all for failures to reach the authorization server
    #[error("Error connecting to the authorization server. Please verify the auth URL and your network connection: {0}")]
    AuthServerUnreachable(String),

    /// The authorization server's certificate was rejected or no usable CA
    /// was configured
    #[error("The authorization server has an untrusted certificate. Please check your CA configuration (ca_certs, --ca-cert or CREDHUB_CA_CERT): {0}")]
    UntrustedAuthServer(String),

    /// The token endpoint rejected the client credentials
    #[error("The provided client credentials are invalid. Please check the client name and secret")]
    InvalidClientCredentials,

    /// Any other authorization server failure
    #[error(transparent)]
    Auth(AuthError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<AuthError> for CredhubError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Transport(TransportError::UntrustedCertificate(detail))
            | AuthError::Transport(TransportError::InvalidCaCertificate(detail)) => {
                CredhubError::UntrustedAuthServer(detail)
            }
            AuthError::Transport(other) => CredhubError::AuthServerUnreachable(other.to_string()),
            AuthError::UnexpectedStatus { status: 401, .. } => {
                CredhubError::InvalidClientCredentials
            }
            other => CredhubError::Auth(other),
        }
    }
}

impl From<TransportError> for CredhubError {
    fn from(err: TransportError) -> Self {
        AuthError::Transport(err).into()
    }
}

/// Result type alias for credhub-cli operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = CredhubError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_untrusted_certificate_is_classified() {
        let error: CredhubError =
            AuthError::Transport(TransportError::UntrustedCertificate("UnknownIssuer".into()))
                .into();
        assert!(matches!(error, CredhubError::UntrustedAuthServer(_)));
        assert!(error.to_string().contains("untrusted certificate"));
        assert!(error.to_string().contains("UnknownIssuer"));
    }

    #[test]
    fn test_missing_ca_is_classified_as_untrusted() {
        let error: CredhubError = TransportError::InvalidCaCertificate("empty".into()).into();
        assert!(matches!(error, CredhubError::UntrustedAuthServer(_)));
    }

    #[test]
    fn test_connect_failure_is_catch_all() {
        let error: CredhubError =
            AuthError::Transport(TransportError::Connect("connection refused".into())).into();
        assert!(matches!(error, CredhubError::AuthServerUnreachable(_)));
        assert!(error.to_string().contains("connection refused"));
    }

    #[test]
    fn test_timeout_is_catch_all() {
        let error: CredhubError = TransportError::Timeout("30s".into()).into();
        assert!(matches!(error, CredhubError::AuthServerUnreachable(_)));
    }

    #[test]
    fn test_unauthorized_is_invalid_credentials() {
        let error: CredhubError = AuthError::UnexpectedStatus {
            status: 401,
            body: "Bad credentials".into(),
        }
        .into();
        assert!(matches!(error, CredhubError::InvalidClientCredentials));
    }

    #[test]
    fn test_auth_error_message_is_not_repeated_in_chain() {
        let error: CredhubError = AuthError::UnexpectedStatus {
            status: 500,
            body: "boom".into(),
        }
        .into();
        let report = format!("{:?}", anyhow::Error::from(error));
        assert_eq!(report.matches("boom").count(), 1, "report: {report}");
    }

    #[test]
    fn test_other_status_stays_auth_error() {
        let error: CredhubError = AuthError::UnexpectedStatus {
            status: 500,
            body: "boom".into(),
        }
        .into();
        assert!(matches!(error, CredhubError::Auth(_)));
        assert!(error.to_string().contains("500"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: CredhubError = io_error.into();
        assert!(matches!(error, CredhubError::Io(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: CredhubError = yaml_error.into();
        assert!(matches!(error, CredhubError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CredhubError>();
    }
}
