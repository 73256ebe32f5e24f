//! Exit codes, logging setup and the follow-up hints printed after a
//! failed command.

use std::process::ExitCode;

use ccai::client::ClientError;
use ccai::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::run::RunError;

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Credentials missing, config file unreadable or invalid (1).
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// API failure, timeout, bad payload or bad signature (2).
    ///
    /// A function because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Next step for a configuration error, if there is an obvious one.
pub fn config_hint(error: &ConfigError) -> Option<&'static str> {
    match error {
        ConfigError::MissingRequired { field: f, .. } if *f == field::CLIENT_ID => {
            Some("Set CCAI_CLIENT_ID, or run 'ccai init' and fill in client.client_id.")
        }
        ConfigError::MissingRequired { field: f, .. } if *f == field::API_KEY => {
            Some("Set CCAI_API_KEY, or run 'ccai init' and fill in client.api_key.")
        }
        ConfigError::FileRead { .. } => {
            Some("Run 'ccai init --output <path>' to generate a configuration template.")
        }
        ConfigError::InvalidUrl { .. } => Some("Check the [urls] section of the config file."),
        _ => None,
    }
}

/// Next step for a failed command, if there is an obvious one.
pub fn runtime_hint(error: &RunError) -> Option<&'static str> {
    match error {
        RunError::Client(ClientError::Http { status, .. })
            if *status == http::StatusCode::UNAUTHORIZED
                || *status == http::StatusCode::FORBIDDEN =>
        {
            Some("Check the client ID and API key, and --test-env for test accounts.")
        }
        RunError::Client(ClientError::TimedOut) => {
            Some("Raise --timeout or client.timeout in the config file.")
        }
        RunError::SignatureMismatch => {
            Some("Use the secret the webhook was registered with and the raw request body.")
        }
        _ => None,
    }
}

/// Prints a configuration error with its hint on stderr.
pub fn print_config_error(error: &ConfigError) {
    eprintln!("Configuration error: {error}");
    if let Some(hint) = config_hint(error) {
        eprintln!("\n{hint}");
    }
}

/// Logs the outcome of a command and maps it to an exit code.
pub fn report(result: Result<(), RunError>) -> ExitCode {
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            if let Some(hint) = runtime_hint(&e) {
                eprintln!("{hint}");
            }
            exit_code::runtime_error()
        }
    }
}

/// Sets up the tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
/// `RUST_LOG` overrides the level chosen by `--verbose`.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
