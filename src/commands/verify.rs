//! `verify` command handler.

use colored::Colorize;

use crate::auth::verify_auth_server_connection;
use crate::config::Config;
use crate::error::{CredhubError, Result};
use crate::transport::http::HttpTransport;
use crate::transport::Transport;

/// Run the `verify` command against the configured auth server
///
/// # Arguments
///
/// * `config` - Loaded and validated configuration
pub async fn run_verify(config: &Config) -> Result<()> {
    tracing::info!("Verifying connection to {}", config.auth_url);
    let transport = HttpTransport::new(config).map_err(CredhubError::from)?;
    let message = verify_with(&transport, config).await?;
    println!("{}", message.green());
    Ok(())
}

/// Check the connection through `transport` and return the success line
pub async fn verify_with(transport: &dyn Transport, config: &Config) -> Result<String> {
    verify_auth_server_connection(transport, config)
        .await
        .map_err(CredhubError::from)?;
    Ok(format!(
        "Authorization server {} is reachable and trusted",
        config.auth_url
    ))
}
