//! credhub-cli - command-line client library for a secret-management service
//!
//! This library provides the authentication core of the CLI: obtaining
//! OAuth2 access tokens with client credentials and checking that the
//! authorization server is reachable over a trusted TLS connection.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `auth`: Token acquisition and auth server connection checks
//! - `transport`: HTTP transport abstraction and the reqwest implementation
//! - `commands`: Handlers for the CLI commands
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use credhub_cli::{AuthTokenClient, Config};
//! use credhub_cli::transport::http::HttpTransport;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let transport = Arc::new(HttpTransport::new(&config)?);
//!     credhub_cli::verify_auth_server_connection(transport.as_ref(), &config).await?;
//!
//!     let client = AuthTokenClient::new(transport, config);
//!     let token = client
//!         .get_auth_token_by_client_credential("my-client", "my-secret")
//!         .await?;
//!     println!("{}", token.authorization_header());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod transport;

// Re-export commonly used types
pub use auth::{verify_auth_server_connection, AuthError, AuthTokenClient, ClientCredential, Token};
pub use config::Config;
pub use error::{CredhubError, Result};
pub use transport::{HttpRequest, HttpResponse, Transport, TransportError};
