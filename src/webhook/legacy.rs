//! The original `type`-tagged webhook schema.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{WebhookError, WebhookEventType};
use crate::id::FlexibleId;

/// Campaign summary attached to legacy events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookCampaign {
    pub id: Option<FlexibleId>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sender_phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub run_at: String,
}

/// Payload shared by both legacy events.
///
/// Absent and `null` fields both decode to their empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageEvent {
    #[serde(deserialize_with = "null_as_default")]
    pub campaign: WebhookCampaign,
    #[serde(deserialize_with = "null_as_default")]
    pub from: String,
    #[serde(deserialize_with = "null_as_default")]
    pub to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

/// A legacy webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    MessageSent(MessageEvent),
    MessageReceived(MessageEvent),
}

impl WebhookEvent {
    #[must_use]
    pub const fn event_type(&self) -> WebhookEventType {
        match self {
            Self::MessageSent(_) => WebhookEventType::MessageSent,
            Self::MessageReceived(_) => WebhookEventType::MessageReceived,
        }
    }

    /// The payload, whichever the variant.
    #[must_use]
    pub const fn message_event(&self) -> &MessageEvent {
        match self {
            Self::MessageSent(event) | Self::MessageReceived(event) => event,
        }
    }
}

/// Parses a legacy payload, dispatching on its top-level `type` field.
///
/// # Errors
///
/// - [`WebhookError::EmptyPayload`] for blank input
/// - [`WebhookError::InvalidJson`] if the input is not JSON
/// - [`WebhookError::MissingEventType`] if `type` is absent
/// - [`WebhookError::UnknownEventType`] for any type other than
///   `message.sent` and `message.received`
/// - [`WebhookError::Decode`] if the fields do not fit the event
///
/// # Example
///
/// ```
/// use ccai::webhook::{WebhookEvent, parse_legacy_event};
///
/// let event = parse_legacy_event(r#"{"type":"message.received","from":"+15551234567"}"#).unwrap();
///
/// assert!(matches!(event, WebhookEvent::MessageReceived(ref e) if e.from == "+15551234567"));
/// ```
pub fn parse_legacy_event(json: &str) -> Result<WebhookEvent, WebhookError> {
    if json.trim().is_empty() {
        return Err(WebhookError::EmptyPayload);
    }
    let value: Value = serde_json::from_str(json).map_err(WebhookError::InvalidJson)?;
    let event_type = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(WebhookError::MissingEventType)?
        .parse::<WebhookEventType>()?;

    match event_type {
        WebhookEventType::MessageSent => decode(event_type, value).map(WebhookEvent::MessageSent),
        WebhookEventType::MessageReceived => {
            decode(event_type, value).map(WebhookEvent::MessageReceived)
        }
    }
}

fn decode<T: DeserializeOwned>(event_type: WebhookEventType, value: Value) -> Result<T, WebhookError> {
    T::deserialize(value).map_err(|source| WebhookError::Decode {
        event_type: event_type.to_string(),
        source,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
