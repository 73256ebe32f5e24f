//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use super::defaults;

/// ccai: CloudContactAI command-line client
///
/// Sends SMS and email campaigns, manages webhook registrations and checks
/// inbound webhook deliveries.
#[derive(Debug, Parser)]
#[command(name = "ccai")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Client ID (account id)
    #[arg(long = "client-id", env = defaults::ENV_CLIENT_ID, global = true)]
    pub client_id: Option<String>,

    /// API key used as the bearer token
    #[arg(long = "api-key", env = defaults::ENV_API_KEY, global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Use the test environment hosts
    #[arg(long = "test-env", global = true)]
    pub test_env: bool,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for ccai
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE_NAME)]
        output: PathBuf,
    },

    /// Send an SMS to one recipient
    Sms(SmsArgs),

    /// Send an email campaign to one recipient
    Email(EmailArgs),

    /// Manage webhook registrations
    #[command(subcommand)]
    Webhooks(WebhooksCommand),

    /// Check a webhook signature against a payload
    Verify(VerifyArgs),

    /// Parse a webhook payload and print the decoded event
    Parse(ParseArgs),
}

/// Recipient and message of the `sms` command.
#[derive(Debug, Args)]
pub struct SmsArgs {
    /// Recipient phone number (E.164)
    #[arg(long)]
    pub phone: String,

    /// Recipient first name
    #[arg(long = "first-name")]
    pub first_name: String,

    /// Recipient last name
    #[arg(long = "last-name")]
    pub last_name: String,

    /// Message text; may use ${FirstName} and ${LastName}
    #[arg(long, short)]
    pub message: String,

    /// Campaign title
    #[arg(long, short)]
    pub title: String,

    /// Sender phone number
    #[arg(long = "sender-phone")]
    pub sender_phone: Option<String>,
}

/// Recipient, sender and content of the `email` command.
#[derive(Debug, Args)]
pub struct EmailArgs {
    /// Recipient email address
    #[arg(long)]
    pub to: String,

    /// Recipient first name
    #[arg(long = "first-name")]
    pub first_name: String,

    /// Recipient last name
    #[arg(long = "last-name")]
    pub last_name: String,

    /// Email subject
    #[arg(long, short)]
    pub subject: String,

    /// HTML message body
    #[arg(long, short)]
    pub message: String,

    /// Campaign title
    #[arg(long, short)]
    pub title: String,

    /// Sender address
    #[arg(long = "sender-email")]
    pub sender_email: String,

    /// Reply-to address
    #[arg(long = "reply-email")]
    pub reply_email: String,

    /// Sender display name
    #[arg(long = "sender-name")]
    pub sender_name: String,
}

/// Webhook registration subcommands.
#[derive(Debug, Subcommand)]
pub enum WebhooksCommand {
    /// List registered webhooks
    List,

    /// Register a new webhook
    Register(WebhookArgs),

    /// Replace an existing webhook
    Update {
        /// Webhook id
        #[arg(long)]
        id: String,

        #[command(flatten)]
        webhook: WebhookArgs,
    },

    /// Delete a webhook
    Delete {
        /// Webhook id
        #[arg(long)]
        id: String,
    },
}

/// Endpoint settings shared by `register` and `update`.
#[derive(Debug, Args)]
pub struct WebhookArgs {
    /// Endpoint receiving the deliveries
    #[arg(long)]
    pub url: String,

    /// Subscribed event (can be specified multiple times)
    #[arg(long = "event", value_enum, required = true)]
    pub events: Vec<EventArg>,

    /// Shared secret for signing deliveries
    #[arg(long)]
    pub secret: Option<String>,
}

/// Event names accepted by `--event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EventArg {
    #[value(name = "message.sent")]
    MessageSent,
    #[value(name = "message.received")]
    MessageReceived,
}

impl From<EventArg> for crate::webhook::WebhookEventType {
    fn from(arg: EventArg) -> Self {
        match arg {
            EventArg::MessageSent => Self::MessageSent,
            EventArg::MessageReceived => Self::MessageReceived,
        }
    }
}

/// Inputs of the `verify` command.
#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Hex signature from the X-CCAI-Signature header
    #[arg(long)]
    pub signature: String,

    /// Webhook secret
    #[arg(long)]
    pub secret: String,

    /// File holding the raw request body (stdin if omitted)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Inputs of the `parse` command.
#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Payload schema
    #[arg(long, value_enum, default_value_t = PayloadFormat::Cloudcontact)]
    pub format: PayloadFormat,

    /// File holding the payload (stdin if omitted)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Webhook payload schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PayloadFormat {
    /// `type`-tagged deliveries
    Legacy,
    /// `eventType` + `data` deliveries
    Cloudcontact,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if the command runs without credentials or network.
    #[must_use]
    pub const fn is_offline(&self) -> bool {
        matches!(
            self.command,
            Command::Init { .. } | Command::Verify(_) | Command::Parse(_)
        )
    }
}
