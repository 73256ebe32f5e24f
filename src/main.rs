//! ccai: CloudContactAI command-line client
//!
//! Entry point for the ccai application.

use std::io;
use std::process::ExitCode;

use ccai::client::{CcaiClient, SendOptions};
use ccai::config::{Cli, Command, ValidatedConfig, write_default_config};

mod app;
mod run;

use app::{exit_code, print_config_error, report, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_tracing(cli.verbose);

    // Commands that need neither credentials nor network
    if cli.is_offline() {
        return run_offline(&cli.command);
    }

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            print_config_error(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    tracing::debug!("{config}");

    run_application(&cli.command, config)
}

/// Handles `init`, `verify` and `parse`.
fn run_offline(command: &Command) -> ExitCode {
    let mut stdout = io::stdout().lock();
    let result = match command {
        Command::Init { output } => return handle_init(output),
        Command::Verify(args) => run::verify(args, &mut stdout),
        Command::Parse(args) => run::parse(args, &mut stdout),
        Command::Sms(_) | Command::Email(_) | Command::Webhooks(_) => Ok(()),
    };
    report(result)
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Runs an API command with the given configuration.
///
/// Excluded from coverage - requires async runtime and network.
#[cfg(not(tarpaulin_include))]
fn run_application(command: &Command, config: ValidatedConfig) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    let client = CcaiClient::new(config.client);
    let options = SendOptions::new()
        .with_timeout(config.timeout)
        .on_progress(|status| tracing::info!("{status}"));

    let result = runtime.block_on(run::execute_until_interrupted(
        &client,
        command,
        &options,
        &mut io::stdout().lock(),
    ));
    client.shutdown();

    report(result)
}
