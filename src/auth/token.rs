//! Client-credentials token acquisition
//!
//! [`AuthTokenClient`] POSTs a `client_credentials` grant to the
//! authorization server's token endpoint, authenticating with HTTP Basic,
//! and decodes the response into a [`Token`].
//!
//! The token endpoint response must have exactly this shape:
//!
//! ```json
//! {"access_token": "<string>", "token_type": "<string>", "expires_in": <integer>}
//! ```

use std::fmt;
use std::sync::Arc;

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::auth::{endpoint, AuthError};
use crate::config::Config;
use crate::transport::{HttpRequest, Method, Transport};

/// Path of the token endpoint relative to the auth URL.
pub const TOKEN_PATH: &str = "/oauth/token";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// An access token issued by the authorization server.
///
/// `Token::default()` is the zero value; a populated token only ever comes
/// from a 200 response that decoded cleanly.
///
/// # Examples
///
/// ```
/// use credhub_cli::auth::Token;
///
/// let token: Token = serde_json::from_str(
///     r#"{"access_token":"3YotnFZFEjr1zCsicMWpAA","token_type":"bearer","expires_in":3600}"#,
/// )
/// .unwrap();
///
/// assert_eq!(token.access_token, "3YotnFZFEjr1zCsicMWpAA");
/// assert_eq!(token.authorization_header(), "bearer 3YotnFZFEjr1zCsicMWpAA");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The access token string.
    pub access_token: String,
    /// The token type, typically `bearer`.
    pub token_type: String,
    /// Lifetime in seconds from issue.
    pub expires_in: i64,
}

impl Token {
    /// Value for the `Authorization` header of API requests.
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// Client identifier and secret for the `client_credentials` grant.
///
/// Neither value is validated; both are forwarded as given.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredential {
    /// OAuth client identifier.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
}

impl ClientCredential {
    /// Creates a credential pair.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// `Basic base64(client_id:client_secret)`.
    pub fn basic_authorization(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.client_id, self.client_secret));
        format!("Basic {}", encoded)
    }
}

impl fmt::Debug for ClientCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredential")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .finish()
    }
}

/// Requests access tokens from the authorization server.
///
/// Holds no mutable state; one instance can serve concurrent callers.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use credhub_cli::auth::AuthTokenClient;
/// use credhub_cli::config::Config;
/// use credhub_cli::transport::http::HttpTransport;
///
/// # async fn example() -> credhub_cli::error::Result<()> {
/// let config = Config {
///     auth_url: "https://uaa.example.com:8443".to_string(),
///     ..Config::default()
/// };
/// let transport = Arc::new(HttpTransport::new(&config)?);
/// let client = AuthTokenClient::new(transport, config);
///
/// let token = client
///     .get_auth_token_by_client_credential("my-client", "my-secret")
///     .await?;
/// println!("{}", token.authorization_header());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AuthTokenClient {
    transport: Arc<dyn Transport>,
    config: Config,
}

impl AuthTokenClient {
    /// Creates a client sending through `transport` to `config.auth_url`.
    pub fn new(transport: Arc<dyn Transport>, config: Config) -> Self {
        Self { transport, config }
    }

    /// Exchanges `client_id`/`client_secret` for an access token.
    ///
    /// Sends one `POST {auth_url}/oauth/token` with
    /// `grant_type=client_credentials` and HTTP Basic authentication.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidUrl`] if the auth URL is empty; nothing is sent.
    /// - [`AuthError::Transport`] with the transport's error unmodified.
    /// - [`AuthError::UnexpectedStatus`] for any status other than 200.
    /// - [`AuthError::Decode`] if the 200 body is not a token.
    pub async fn get_auth_token_by_client_credential(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Token, AuthError> {
        let credential = ClientCredential::new(client_id, client_secret);
        let request = self.token_request(&credential)?;

        tracing::debug!(url = %request.url, client_id, "Requesting client credentials token");

        let response = self.transport.send(request).await?;

        if response.status != 200 {
            tracing::debug!(status = response.status, "Token request rejected");
            return Err(AuthError::unexpected_status(response.status, &response.body));
        }

        let token: Token = serde_json::from_str(&response.body)?;

        tracing::debug!(
            token_type = %token.token_type,
            expires_in = token.expires_in,
            "Token acquired"
        );
        Ok(token)
    }

    fn token_request(&self, credential: &ClientCredential) -> Result<HttpRequest, AuthError> {
        let url = endpoint(&self.config.auth_url, TOKEN_PATH)?;
        let form = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "client_credentials")
            .append_pair("response_type", "token")
            .finish();

        Ok(HttpRequest::new(Method::POST, url)
            .header("Authorization", credential.basic_authorization())
            .header("Content-Type", FORM_CONTENT_TYPE)
            .header("Accept", JSON_CONTENT_TYPE)
            .body(form))
    }
}
