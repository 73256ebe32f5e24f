//! Configuration layer for the CloudContactAI client.
//!
//! This module provides:
//! - Client configuration with credentials and base URLs ([`ClientConfig`])
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration for the binary ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! The binary resolves values with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - including `CCAI_CLIENT_ID` / `CCAI_API_KEY`
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! Empty credentials count as absent. `--test-env` only enables: once set in
//! TOML, the CLI cannot switch it back off.

mod cli;
mod client;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{
    Cli, Command, EmailArgs, EventArg, ParseArgs, PayloadFormat, SmsArgs, VerifyArgs, WebhookArgs,
    WebhooksCommand,
};
pub use client::ClientConfig;
pub use error::{ConfigError, field};
pub use toml::{ClientSection, TomlConfig, UrlsSection, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
