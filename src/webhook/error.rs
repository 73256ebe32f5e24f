//! Error types for webhook payload parsing.

use thiserror::Error;

/// An inbound webhook payload could not be parsed.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The payload was empty.
    #[error("Webhook payload is empty")]
    EmptyPayload,

    /// The payload is not valid JSON.
    #[error("Webhook payload is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The discriminant field is absent or not a string.
    #[error("Event type not found in webhook payload")]
    MissingEventType,

    /// The discriminant names an event this parser does not know.
    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    /// A known event arrived without its `data` object.
    #[error("Webhook payload has no data object")]
    MissingData,

    /// The payload matched a known event but its fields did not fit.
    #[error("Failed to decode {event_type} event: {source}")]
    Decode {
        /// The discriminant that was matched
        event_type: String,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },
}
