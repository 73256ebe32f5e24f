//! Default values for configuration options.
//!
//! Centralized constants to avoid URLs scattered across the codebase.

/// Production base URL of the core messaging API (SMS, MMS, webhooks).
pub const CORE_BASE_URL: &str = "https://core.cloudcontactai.com/api";

/// Production base URL of the email campaigns API.
pub const EMAIL_BASE_URL: &str = "https://email-campaigns.cloudcontactai.com";

/// Production base URL of the auth API.
pub const AUTH_BASE_URL: &str = "https://auth.cloudcontactai.com";

/// Base URL of the file-upload service. Same host in both environments.
pub const FILES_BASE_URL: &str = "https://files.cloudcontactai.com";

/// Test-environment base URL of the core messaging API.
pub const TEST_CORE_BASE_URL: &str = "https://core-test-cloudcontactai.allcode.com/api";

/// Test-environment base URL of the email campaigns API.
pub const TEST_EMAIL_BASE_URL: &str = "https://email-campaigns-test-cloudcontactai.allcode.com";

/// Test-environment base URL of the auth API.
pub const TEST_AUTH_BASE_URL: &str = "https://auth-test-cloudcontactai.allcode.com";

/// Default config file name written by `ccai init`.
pub const CONFIG_FILE_NAME: &str = "ccai.toml";

/// Environment variable holding the client ID.
pub const ENV_CLIENT_ID: &str = "CCAI_CLIENT_ID";

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "CCAI_API_KEY";

/// Request timeout used by the CLI when none is configured, in seconds.
pub const TIMEOUT_SECS: u64 = 30;
