//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::cli::Cli;
use super::client::ClientConfig;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::{TomlConfig, UrlsSection};

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Credentials and base URLs
    pub client: ClientConfig,

    /// Deadline applied to every API call
    pub timeout: Duration,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let environment = if self.client.use_test_environment() {
            "test"
        } else {
            "production"
        };

        write!(
            f,
            "Config {{ client_id: {}, environment: {}, core: {}, email: {}, timeout: {}s }}",
            self.client.client_id(),
            environment,
            self.client.core_base_url(),
            self.client.email_base_url(),
            self.timeout.as_secs(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments (including their environment variables) take precedence
    /// over TOML config values. An empty value counts as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Credentials are missing (`client_id`, `api_key`)
    /// - A base URL override is invalid
    /// - The timeout is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let client_id = resolve_credential(
            cli.client_id.as_deref(),
            toml.and_then(|t| t.client.client_id.as_deref()),
        )
        .ok_or_else(|| {
            ConfigError::missing(
                field::CLIENT_ID,
                "Use --client-id, set CCAI_CLIENT_ID, or set client.client_id in config file",
            )
        })?;

        let api_key = resolve_credential(
            cli.api_key.as_deref(),
            toml.and_then(|t| t.client.api_key.as_deref()),
        )
        .ok_or_else(|| {
            ConfigError::missing(
                field::API_KEY,
                "Use --api-key, set CCAI_API_KEY, or set client.api_key in config file",
            )
        })?;

        // Flag only enables
        let test_env = cli.test_env || toml.is_some_and(|t| t.client.test_environment);

        let mut client = ClientConfig::new(client_id, api_key)?.with_test_environment(test_env);
        if let Some(toml) = toml {
            client = apply_url_overrides(client, &toml.urls)?;
        }

        let timeout = Self::resolve_timeout(cli, toml)?;

        Ok(Self { client, timeout })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path after
    /// expanding a leading `~`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(&expand_tilde(path))?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.client.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidTimeout {
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn resolve_credential(cli: Option<&str>, toml: Option<&str>) -> Option<String> {
    cli.filter(|v| !v.is_empty())
        .or_else(|| toml.filter(|v| !v.is_empty()))
        .map(str::to_string)
}

fn apply_url_overrides(
    mut client: ClientConfig,
    urls: &UrlsSection,
) -> Result<ClientConfig, ConfigError> {
    if let Some(ref url) = urls.core {
        client = client.with_core_base_url(url.as_str())?;
    }
    if let Some(ref url) = urls.email {
        client = client.with_email_base_url(url.as_str())?;
    }
    if let Some(ref url) = urls.auth {
        client = client.with_auth_base_url(url.as_str())?;
    }
    if let Some(ref url) = urls.files {
        client = client.with_files_base_url(url.as_str())?;
    }
    Ok(client)
}

/// Replaces a leading `~` with the home directory, if one is known.
pub(crate) fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}
