//! `token` command handler.

use std::sync::Arc;

use crate::auth::{verify_auth_server_connection, AuthTokenClient, ClientCredential};
use crate::config::Config;
use crate::error::{CredhubError, Result};
use crate::transport::http::HttpTransport;
use crate::transport::Transport;

/// Run the `token` command and print the result to stdout
///
/// # Arguments
///
/// * `config` - Loaded and validated configuration
/// * `credential` - Client name and secret from the command line
/// * `json` - Print the whole token response instead of the header value
pub async fn run_token(config: &Config, credential: ClientCredential, json: bool) -> Result<()> {
    tracing::info!(client_id = %credential.client_id, "Requesting access token");
    let transport: Arc<dyn Transport> =
        Arc::new(HttpTransport::new(config).map_err(CredhubError::from)?);
    let output = fetch_token(transport, config, &credential, json).await?;
    println!("{}", output);
    Ok(())
}

/// Verify the auth server, fetch a token and render it for output
///
/// The connection check runs first so that a trust problem is reported as
/// such rather than as a failed token request.
pub async fn fetch_token(
    transport: Arc<dyn Transport>,
    config: &Config,
    credential: &ClientCredential,
    json: bool,
) -> Result<String> {
    verify_auth_server_connection(transport.as_ref(), config)
        .await
        .map_err(CredhubError::from)?;

    let client = AuthTokenClient::new(transport, config.clone());
    let token = client
        .get_auth_token_by_client_credential(&credential.client_id, &credential.client_secret)
        .await
        .map_err(CredhubError::from)?;

    if json {
        Ok(serde_json::to_string_pretty(&token)?)
    } else {
        Ok(token.authorization_header())
    }
}
