//! Configuration management for credhub-cli
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//!
//! Precedence, lowest to highest: YAML file, `CREDHUB_*` environment
//! variables, command-line flags.

use crate::error::{CredhubError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name inside the platform config directory
const CONFIG_FILE: &str = "config.yaml";

/// PEM armour that marks an inline certificate rather than a file path
const PEM_CERTIFICATE_MARKER: &str = "-----BEGIN CERTIFICATE-----";

/// Connection settings for the authorization server
///
/// Loaded once per invocation and read-only afterwards; the auth core only
/// ever borrows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the authorization server (e.g. `https://uaa.example.com:8443`)
    #[serde(default)]
    pub auth_url: String,

    /// Trusted CA certificates
    ///
    /// Each entry is either inline PEM or a path to a PEM file. Paths are
    /// replaced by the file contents during [`Config::load`].
    #[serde(default)]
    pub ca_certs: Vec<String>,

    /// Accept any server certificate
    #[serde(default)]
    pub skip_tls_validation: bool,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed, or if a CA
    /// certificate path cannot be read
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);
        config.resolve_ca_certs()?;

        Ok(config)
    }

    /// Default config file location for this platform
    ///
    /// `~/.config/credhub-cli/config.yaml` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "credhub-cli")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CredhubError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| CredhubError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(auth_url) = std::env::var("CREDHUB_AUTH_URL") {
            tracing::debug!(auth_url = %auth_url, "Env override: CREDHUB_AUTH_URL");
            self.auth_url = auth_url;
        }

        if let Ok(ca_cert) = std::env::var("CREDHUB_CA_CERT") {
            if !ca_cert.trim().is_empty() {
                self.ca_certs.push(ca_cert);
                tracing::debug!("Env override: CREDHUB_CA_CERT");
            }
        }

        if let Ok(skip) = std::env::var("CREDHUB_SKIP_TLS_VALIDATION") {
            match skip.parse::<bool>() {
                Ok(v) => {
                    self.skip_tls_validation = v;
                    tracing::debug!(
                        skip_tls_validation = v,
                        "Env override: CREDHUB_SKIP_TLS_VALIDATION"
                    );
                }
                Err(_) => {
                    tracing::warn!("Invalid value for CREDHUB_SKIP_TLS_VALIDATION: {}", skip);
                }
            }
        }

        if let Ok(timeout) = std::env::var("CREDHUB_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid CREDHUB_TIMEOUT_SECONDS: {}", timeout);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(auth_url) = &cli.auth_url {
            self.auth_url = auth_url.clone();
        }

        self.ca_certs.extend(cli.ca_cert.iter().cloned());

        if cli.skip_tls_validation {
            self.skip_tls_validation = true;
        }
    }

    /// Replaces CA entries that are file paths with the file contents
    fn resolve_ca_certs(&mut self) -> Result<()> {
        for entry in self.ca_certs.iter_mut() {
            if entry.contains(PEM_CERTIFICATE_MARKER) {
                continue;
            }
            let path = entry.trim().to_string();
            let contents = std::fs::read_to_string(&path).map_err(|e| {
                CredhubError::Config(format!("Failed to read CA certificate {}: {}", path, e))
            })?;
            tracing::debug!(path = %path, "Loaded CA certificate from file");
            *entry = contents;
        }
        Ok(())
    }

    /// Validate the configuration
    ///
    /// Ensures the auth URL is an absolute `http`/`https` URL, every CA
    /// entry is PEM, and the timeout is non-zero.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.auth_url.trim().is_empty() {
            return Err(CredhubError::Config(
                "auth_url must be set (config file, CREDHUB_AUTH_URL or --auth-url)".to_string(),
            )
            .into());
        }

        let parsed = url::Url::parse(self.auth_url.trim()).map_err(|e| {
            CredhubError::Config(format!("Invalid auth_url '{}': {}", self.auth_url, e))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CredhubError::Config(format!(
                "Invalid auth_url scheme: {}. Must be one of: http, https",
                parsed.scheme()
            ))
            .into());
        }

        if self.timeout_seconds == 0 {
            return Err(
                CredhubError::Config("timeout_seconds must be greater than 0".to_string()).into(),
            );
        }

        for (index, pem) in self.ca_certs.iter().enumerate() {
            if !pem.contains(PEM_CERTIFICATE_MARKER) {
                return Err(CredhubError::Config(format!(
                    "ca_certs[{}] is not a PEM encoded certificate",
                    index
                ))
                .into());
            }
        }

        if self.skip_tls_validation {
            tracing::warn!(
                "skip_tls_validation is enabled; server certificates will not be verified"
            );
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_url: String::new(),
            ca_certs: Vec::new(),
            skip_tls_validation: false,
            timeout_seconds: default_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use serial_test::serial;
    use std::env;

    const TEST_PEM: &str = "-----BEGIN CERTIFICATE-----\nMIIBszCCAVmgAwIBAgIUb3RoZXI=\n-----END CERTIFICATE-----\n";

    fn valid_config() -> Config {
        Config {
            auth_url: "https://uaa.example.com:8443".to_string(),
            ..Config::default()
        }
    }

    fn clear_env() {
        for var in [
            "CREDHUB_AUTH_URL",
            "CREDHUB_CA_CERT",
            "CREDHUB_SKIP_TLS_VALIDATION",
            "CREDHUB_TIMEOUT_SECONDS",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.auth_url.is_empty());
        assert!(config.ca_certs.is_empty());
        assert!(!config.skip_tls_validation);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_config_validation_success() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_auth_url() {
        let err = Config::default().validate().unwrap_err();
        assert!(err.to_string().contains("auth_url must be set"));
    }

    #[test]
    fn test_config_validation_relative_auth_url() {
        let config = Config {
            auth_url: "example.com".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_scheme() {
        let config = Config {
            auth_url: "ftp://uaa.example.com".to_string(),
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scheme"));
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = valid_config();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_non_pem_ca() {
        let mut config = valid_config();
        config.ca_certs.push("garbage".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ca_certs[0]"));
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
auth_url: https://uaa.example.com:8443
skip_tls_validation: true
timeout_seconds: 10
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.auth_url, "https://uaa.example.com:8443");
        assert!(config.skip_tls_validation);
        assert_eq!(config.timeout_seconds, 10);
        assert!(config.ca_certs.is_empty());
    }

    #[test]
    #[serial]
    fn test_load_nonexistent_file_uses_defaults() {
        clear_env();
        let cli = Cli::default();
        let config = Config::load("/nonexistent/credhub-cli/config.yaml", &cli).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_load_resolves_ca_cert_paths() {
        clear_env();
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let ca_path = dir.path().join("ca.pem");
        std::fs::write(&ca_path, TEST_PEM).unwrap();

        let config_path = dir.path().join("config.yaml");
        std::fs::write(
            &config_path,
            format!(
                "auth_url: https://uaa.example.com\nca_certs:\n  - {}\n",
                ca_path.display()
            ),
        )
        .unwrap();

        let config = Config::load(config_path.to_str().unwrap(), &Cli::default()).unwrap();
        assert_eq!(config.ca_certs, vec![TEST_PEM.to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_load_missing_ca_cert_path_fails() {
        clear_env();
        let mut cli = Cli::default();
        cli.ca_cert = vec!["/nonexistent/ca.pem".to_string()];
        let err = Config::load("/nonexistent/config.yaml", &cli).unwrap_err();
        assert!(err.to_string().contains("Failed to read CA certificate"));
    }

    #[test]
    #[serial]
    fn test_load_invalid_yaml_fails() {
        clear_env();
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let config_path = dir.path().join("config.yaml");
        std::fs::write(&config_path, "auth_url: [unterminated").unwrap();

        let err = Config::load(config_path.to_str().unwrap(), &Cli::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    #[serial]
    fn test_env_vars_override_file() {
        clear_env();
        env::set_var("CREDHUB_AUTH_URL", "https://env.example.com");
        env::set_var("CREDHUB_SKIP_TLS_VALIDATION", "true");
        env::set_var("CREDHUB_TIMEOUT_SECONDS", "5");

        let config = Config::load("/nonexistent/config.yaml", &Cli::default()).unwrap();
        clear_env();

        assert_eq!(config.auth_url, "https://env.example.com");
        assert!(config.skip_tls_validation);
        assert_eq!(config.timeout_seconds, 5);
    }

    #[test]
    #[serial]
    fn test_invalid_env_values_are_ignored() {
        clear_env();
        env::set_var("CREDHUB_SKIP_TLS_VALIDATION", "sometimes");
        env::set_var("CREDHUB_TIMEOUT_SECONDS", "soon");

        let config = Config::load("/nonexistent/config.yaml", &Cli::default()).unwrap();
        clear_env();

        assert!(!config.skip_tls_validation);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    #[serial]
    fn test_cli_overrides_env() {
        clear_env();
        env::set_var("CREDHUB_AUTH_URL", "https://env.example.com");

        let mut cli = Cli::default();
        cli.auth_url = Some("https://flag.example.com".to_string());
        cli.ca_cert = vec![TEST_PEM.to_string()];
        cli.skip_tls_validation = true;

        let config = Config::load("/nonexistent/config.yaml", &cli).unwrap();
        clear_env();

        assert_eq!(config.auth_url, "https://flag.example.com");
        assert_eq!(config.ca_certs.len(), 1);
        assert!(config.skip_tls_validation);
    }

    #[test]
    fn test_default_path_ends_with_config_file() {
        if let Some(path) = Config::default_path() {
            assert!(path.ends_with(CONFIG_FILE));
        }
    }
}
