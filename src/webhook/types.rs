//! Webhook registration models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::WebhookError;
use crate::client::{ExtensionData, ValidationError};
use crate::id::FlexibleId;

/// Events a webhook can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookEventType {
    #[serde(rename = "message.sent")]
    MessageSent,
    #[serde(rename = "message.received")]
    MessageReceived,
}

impl WebhookEventType {
    /// Wire name of the event.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MessageSent => "message.sent",
            Self::MessageReceived => "message.received",
        }
    }
}

impl fmt::Display for WebhookEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebhookEventType {
    type Err = WebhookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message.sent" => Ok(Self::MessageSent),
            "message.received" => Ok(Self::MessageReceived),
            other => Err(WebhookError::UnknownEventType(other.to_string())),
        }
    }
}

/// Webhook endpoint registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Endpoint receiving the deliveries
    pub url: String,
    /// Subscribed events, in order
    pub events: Vec<WebhookEventType>,
    /// Shared secret for signing deliveries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl WebhookConfig {
    #[must_use]
    pub fn new(url: impl Into<String>, events: Vec<WebhookEventType>) -> Self {
        Self {
            url: url.into(),
            events,
            secret: None,
        }
    }

    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Checks that the URL and event list are non-empty.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::Missing { field: "URL" });
        }
        if self.events.is_empty() {
            return Err(ValidationError::Empty { item: "event type" });
        }
        Ok(())
    }
}

/// A registered webhook as returned by the API.
///
/// `events` keeps the wire names as sent, including events this crate has
/// no [`WebhookEventType`] for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookRegistration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FlexibleId>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(flatten)]
    pub extra: ExtensionData,
}

impl WebhookRegistration {
    /// The subscribed events that map onto a [`WebhookEventType`], in order.
    pub fn known_events(&self) -> impl Iterator<Item = WebhookEventType> + '_ {
        self.events.iter().filter_map(|name| name.parse().ok())
    }
}

/// Result of deleting a webhook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookDeleteResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub extra: ExtensionData,
}
