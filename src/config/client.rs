//! Credentials and base-URL resolution for the API client.

use std::fmt;

use url::Url;

use super::defaults;
use super::error::{ConfigError, field};

/// Credentials plus the base URLs of every CloudContactAI API family.
///
/// Construction validates the credentials, so a `ClientConfig` value is
/// always usable. Fields are private; the base-URL getters apply the
/// test-environment switch at read time, returning fixed test hosts rather
/// than a rewritten production URL.
///
/// # Example
///
/// ```
/// use ccai::config::ClientConfig;
///
/// let config = ClientConfig::new("1231", "secret-key")
///     .unwrap()
///     .with_test_environment(true);
///
/// assert_eq!(
///     config.core_base_url(),
///     "https://core-test-cloudcontactai.allcode.com/api"
/// );
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    client_id: String,
    api_key: String,
    core_base_url: String,
    email_base_url: String,
    auth_base_url: String,
    files_base_url: String,
    use_test_environment: bool,
}

impl ClientConfig {
    /// Creates a production configuration with the default base URLs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if `client_id` or `api_key`
    /// is empty.
    pub fn new(client_id: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let client_id = client_id.into();
        let api_key = api_key.into();

        if client_id.is_empty() {
            return Err(ConfigError::missing(
                field::CLIENT_ID,
                "Client ID is required",
            ));
        }
        if api_key.is_empty() {
            return Err(ConfigError::missing(field::API_KEY, "API key is required"));
        }

        Ok(Self {
            client_id,
            api_key,
            core_base_url: defaults::CORE_BASE_URL.to_string(),
            email_base_url: defaults::EMAIL_BASE_URL.to_string(),
            auth_base_url: defaults::AUTH_BASE_URL.to_string(),
            files_base_url: defaults::FILES_BASE_URL.to_string(),
            use_test_environment: false,
        })
    }

    /// Switches between the production and the test hosts.
    #[must_use]
    pub const fn with_test_environment(mut self, enabled: bool) -> Self {
        self.use_test_environment = enabled;
        self
    }

    /// Overrides the production core API URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL does not parse.
    pub fn with_core_base_url(mut self, url: impl Into<String>) -> Result<Self, ConfigError> {
        self.core_base_url = normalize_base_url(url.into())?;
        Ok(self)
    }

    /// Overrides the production email API URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL does not parse.
    pub fn with_email_base_url(mut self, url: impl Into<String>) -> Result<Self, ConfigError> {
        self.email_base_url = normalize_base_url(url.into())?;
        Ok(self)
    }

    /// Overrides the production auth API URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL does not parse.
    pub fn with_auth_base_url(mut self, url: impl Into<String>) -> Result<Self, ConfigError> {
        self.auth_base_url = normalize_base_url(url.into())?;
        Ok(self)
    }

    /// Overrides the file-upload service URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL does not parse.
    pub fn with_files_base_url(mut self, url: impl Into<String>) -> Result<Self, ConfigError> {
        self.files_base_url = normalize_base_url(url.into())?;
        Ok(self)
    }

    /// Returns the client ID.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns true if the test hosts are in use.
    #[must_use]
    pub const fn use_test_environment(&self) -> bool {
        self.use_test_environment
    }

    /// Base URL of the core messaging API for the active environment.
    #[must_use]
    pub fn core_base_url(&self) -> &str {
        if self.use_test_environment {
            defaults::TEST_CORE_BASE_URL
        } else {
            &self.core_base_url
        }
    }

    /// Base URL of the email API for the active environment.
    #[must_use]
    pub fn email_base_url(&self) -> &str {
        if self.use_test_environment {
            defaults::TEST_EMAIL_BASE_URL
        } else {
            &self.email_base_url
        }
    }

    /// Base URL of the auth API for the active environment.
    #[must_use]
    pub fn auth_base_url(&self) -> &str {
        if self.use_test_environment {
            defaults::TEST_AUTH_BASE_URL
        } else {
            &self.auth_base_url
        }
    }

    /// Base URL of the file-upload service.
    #[must_use]
    pub fn files_base_url(&self) -> &str {
        &self.files_base_url
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("client_id", &self.client_id)
            .field("api_key", &"[REDACTED]")
            .field("core_base_url", &self.core_base_url())
            .field("email_base_url", &self.email_base_url())
            .field("auth_base_url", &self.auth_base_url())
            .field("files_base_url", &self.files_base_url)
            .field("use_test_environment", &self.use_test_environment)
            .finish()
    }
}

/// Validates a base URL and strips trailing slashes so paths can be appended.
fn normalize_base_url(raw: String) -> Result<String, ConfigError> {
    let url = Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl {
        url: raw.clone(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            url: raw,
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(raw.trim_end_matches('/').to_string())
}
