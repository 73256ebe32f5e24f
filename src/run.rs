//! Command execution.
//!
//! API commands run against a [`CcaiClient`]; `verify` and `parse` only read
//! a payload and never touch the network.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use ccai::client::{CcaiClient, ClientError, SendOptions};
use ccai::config::{
    Command, EmailArgs, ParseArgs, PayloadFormat, SmsArgs, VerifyArgs, WebhookArgs, WebhooksCommand,
};
use ccai::email::{EmailAccount, Sender};
use ccai::sms::{Account, SmsRequest};
use ccai::transport::HttpClient;
use ccai::webhook::{
    CloudContactEvent, WebhookConfig, WebhookError, parse_cloudcontact_event, parse_legacy_event,
    verify_signature,
};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The API call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Failed to read the payload file or stdin.
    #[error("Failed to read payload: {0}")]
    Input(#[source] io::Error),

    /// Failed to write the result.
    #[error("Failed to write output: {0}")]
    Output(#[source] io::Error),

    /// The payload could not be parsed.
    #[error("Invalid webhook payload: {0}")]
    Webhook(#[from] WebhookError),

    /// The signature does not match the payload and secret.
    #[error("Signature does not match payload")]
    SignatureMismatch,
}

/// Runs an API command, abandoning it on Ctrl+C.
///
/// # Coverage Note
///
/// Excluded from coverage because it waits on a process signal.
#[cfg(not(tarpaulin_include))]
pub async fn execute_until_interrupted<H: HttpClient>(
    client: &CcaiClient<H>,
    command: &Command,
    options: &SendOptions,
    out: &mut impl Write,
) -> Result<(), RunError> {
    tokio::select! {
        result = execute(client, command, options, out) => result,
        Ok(()) = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupt received, request cancelled");
            Err(RunError::Client(ClientError::Cancelled))
        }
    }
}

/// Runs an API command and writes the JSON response to `out`.
///
/// Offline commands are not handled here and succeed without output.
///
/// # Errors
///
/// Returns the client error of the failed call, or an output error.
pub async fn execute<H: HttpClient>(
    client: &CcaiClient<H>,
    command: &Command,
    options: &SendOptions,
    out: &mut impl Write,
) -> Result<(), RunError> {
    match command {
        Command::Sms(args) => {
            let response = client.sms().send(sms_request(args), options).await?;
            write_json(out, &response)
        }
        Command::Email(args) => {
            let (account, sender) = email_parts(args);
            let response = client
                .email()
                .send_single(account, &args.subject, &args.message, sender, &args.title, options)
                .await?;
            write_json(out, &response)
        }
        Command::Webhooks(webhooks) => execute_webhooks(client, webhooks, options, out).await,
        Command::Init { .. } | Command::Verify(_) | Command::Parse(_) => {
            tracing::debug!("Offline command reached the API dispatcher; nothing to send");
            Ok(())
        }
    }
}

async fn execute_webhooks<H: HttpClient>(
    client: &CcaiClient<H>,
    command: &WebhooksCommand,
    options: &SendOptions,
    out: &mut impl Write,
) -> Result<(), RunError> {
    let service = client.webhooks().with_options(options.clone());

    match command {
        WebhooksCommand::List => write_json(out, &service.list().await?),
        WebhooksCommand::Register(args) => {
            write_json(out, &service.register(&webhook_config(args)).await?)
        }
        WebhooksCommand::Update { id, webhook } => {
            write_json(out, &service.update(id, &webhook_config(webhook)).await?)
        }
        WebhooksCommand::Delete { id } => write_json(out, &service.delete(id).await?),
    }
}

/// Checks a webhook signature and reports the outcome.
///
/// # Errors
///
/// Returns [`RunError::SignatureMismatch`] for an invalid signature.
pub fn verify(args: &VerifyArgs, out: &mut impl Write) -> Result<(), RunError> {
    let body = read_payload(args.file.as_deref())?;

    if !verify_signature(&args.signature, &body, &args.secret) {
        return Err(RunError::SignatureMismatch);
    }

    writeln!(out, "Signature valid").map_err(RunError::Output)
}

/// Parses a webhook payload and writes the decoded event as JSON.
///
/// # Errors
///
/// Returns [`RunError::Webhook`] if the payload does not parse.
pub fn parse(args: &ParseArgs, out: &mut impl Write) -> Result<(), RunError> {
    let payload = read_payload(args.file.as_deref())?;

    let decoded = match args.format {
        PayloadFormat::Legacy => {
            let event = parse_legacy_event(&payload)?;
            json!({
                "type": event.event_type().as_str(),
                "event": event.message_event(),
            })
        }
        PayloadFormat::Cloudcontact => {
            let event = parse_cloudcontact_event(&payload)?;
            json!({
                "eventType": event.event_type(),
                "recognized": event.is_recognized(),
                "data": cloudcontact_data(&event)?,
            })
        }
    };

    write_json(out, &decoded)
}

fn cloudcontact_data(event: &CloudContactEvent) -> Result<Value, RunError> {
    let value = match event {
        CloudContactEvent::MessageSent(d) => serde_json::to_value(d),
        CloudContactEvent::MessageIncoming(d) => serde_json::to_value(d),
        CloudContactEvent::MessageExcluded(d) => serde_json::to_value(d),
        CloudContactEvent::CarrierError(d) | CloudContactEvent::CloudContactError(d) => {
            serde_json::to_value(d)
        }
        CloudContactEvent::ContactUnsubscribed(d) => serde_json::to_value(d),
        CloudContactEvent::Unrecognized { data, .. } => Ok(data.clone()),
    };
    value.map_err(|e| RunError::Output(e.into()))
}

fn sms_request(args: &SmsArgs) -> SmsRequest {
    let account = Account::new(&args.first_name, &args.last_name, &args.phone);
    let request = SmsRequest::single(account, &args.message, &args.title);
    match args.sender_phone {
        Some(ref phone) => request.with_sender_phone(phone),
        None => request,
    }
}

fn email_parts(args: &EmailArgs) -> (EmailAccount, Sender) {
    (
        EmailAccount::new(&args.first_name, &args.last_name, &args.to),
        Sender::new(&args.sender_email, &args.reply_email, &args.sender_name),
    )
}

fn webhook_config(args: &WebhookArgs) -> WebhookConfig {
    let events = args.events.iter().copied().map(Into::into).collect();
    let config = WebhookConfig::new(&args.url, events);
    match args.secret {
        Some(ref secret) => config.with_secret(secret),
        None => config,
    }
}

fn read_payload(file: Option<&Path>) -> Result<String, RunError> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => io::read_to_string(io::stdin()),
    }
    .map_err(RunError::Input)
}

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<(), RunError> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(|e| RunError::Output(e.into()))?;
    writeln!(out).map_err(RunError::Output)
}
