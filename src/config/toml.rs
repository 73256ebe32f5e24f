//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Credentials and request settings
    #[serde(default)]
    pub client: ClientSection,

    /// Base URL overrides
    #[serde(default)]
    pub urls: UrlsSection,
}

/// Client configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    /// Client ID (account id)
    pub client_id: Option<String>,

    /// API key
    pub api_key: Option<String>,

    /// Use the test environment hosts
    #[serde(default)]
    pub test_environment: bool,

    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

/// Base URL overrides. Each applies to production mode only.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UrlsSection {
    pub core: Option<String>,
    pub email: Option<String>,
    pub auth: Option<String>,
    pub files: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# CloudContactAI client configuration

[client]
# Client ID (required; can also come from --client-id or CCAI_CLIENT_ID)
# client_id = "1231"

# API key (required; can also come from --api-key or CCAI_API_KEY)
# api_key = "your-api-key"

# Use the test environment hosts (can also be enabled by --test-env)
# test_environment = false

# Request timeout in seconds (default: 30)
# timeout = 30

[urls]
# Production base URL overrides. Ignored when test_environment is on,
# except for the files host which is the same in both environments.
# core = "https://core.cloudcontactai.com/api"
# email = "https://email-campaigns.cloudcontactai.com"
# auth = "https://auth.cloudcontactai.com"
# files = "https://files.cloudcontactai.com"
"#
    .to_string()
}
