//! Command-line interface definition for credhub-cli
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands to check the authorization server and obtain tokens.

use clap::{Parser, Subcommand};

/// credhub-cli - command-line client for a secret-management service
///
/// Authenticates against the service's OAuth2 authorization server.
#[derive(Parser, Debug, Clone)]
#[command(name = "credhub-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "CREDHUB_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Authorization server URL (overrides config and CREDHUB_AUTH_URL)
    #[arg(long, global = true)]
    pub auth_url: Option<String>,

    /// Trusted CA certificate, inline PEM or a file path (repeatable)
    #[arg(long = "ca-cert", global = true)]
    pub ca_cert: Vec<String>,

    /// Do not verify the authorization server's certificate
    #[arg(long, global = true)]
    pub skip_tls_validation: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for credhub-cli
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Check that the authorization server is reachable and trusted
    Verify,

    /// Obtain an access token with client credentials
    Token {
        /// OAuth client name
        #[arg(long, env = "CREDHUB_CLIENT")]
        client_name: String,

        /// OAuth client secret
        #[arg(long, env = "CREDHUB_SECRET", hide_env_values = true)]
        client_secret: String,

        /// Print the full token response as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: None,
            verbose: false,
            auth_url: None,
            ca_cert: Vec::new(),
            skip_tls_validation: false,
            command: Commands::Verify,
        }
    }
}
