//! credhub-cli - command-line client for a secret-management service
//!
#![doc = "credhub-cli"]
#![doc = "Main entry point for the credhub-cli application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use credhub_cli::auth::ClientCredential;
use credhub_cli::cli::{Cli, Commands};
use credhub_cli::commands;
use credhub_cli::config::Config;

/// Used when no platform config directory can be determined
const FALLBACK_CONFIG_PATH: &str = "config.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli
        .config
        .clone()
        .or_else(|| Config::default_path().map(|p| p.to_string_lossy().into_owned()))
        .unwrap_or_else(|| FALLBACK_CONFIG_PATH.to_string());
    let config = Config::load(&config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Verify => {
            tracing::info!("Starting auth server verification");
            commands::verify::run_verify(&config).await?;
            Ok(())
        }
        Commands::Token {
            client_name,
            client_secret,
            json,
        } => {
            tracing::info!("Starting client credentials login");
            let credential = ClientCredential::new(client_name, client_secret);
            commands::token::run_token(&config, credential, json).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so that token output on stdout stays pipeable.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "credhub_cli=debug"
    } else {
        "credhub_cli=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
