//! The `eventType` + `data` webhook schema.
//!
//! Field names inside `data` are PascalCase. The `message.sent` name also
//! exists in the legacy schema with a different envelope, so payloads must be
//! routed to the parser matching their source.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::WebhookError;
use crate::client::ExtensionData;
use crate::id::{FlexibleId, deserialize_lenient_string};

pub const MESSAGE_SENT: &str = "message.sent";
pub const MESSAGE_INCOMING: &str = "message.incoming";
pub const MESSAGE_EXCLUDED: &str = "message.excluded";
pub const CARRIER_ERROR: &str = "message.error.carrier";
pub const CLOUDCONTACT_ERROR: &str = "message.error.cloudcontact";
pub const CONTACT_UNSUBSCRIBED: &str = "contact.unsubscribed";

/// Fields carried by every CloudContact event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EventBase {
    /// Message id; `0` for messages that were never handed to a carrier
    pub sms_sid: Option<FlexibleId>,
    pub message_status: Option<String>,
    pub to: Option<String>,
    pub message: Option<String>,
    /// `messageData` of the recipient account, echoed back
    pub custom_data: Option<String>,
    pub client_external_id: Option<String>,
    pub campaign_id: Option<FlexibleId>,
    pub campaign_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageSentData {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub segments: Option<u32>,
    #[serde(default)]
    pub total_price: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageIncomingData {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub from: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageExcludedData {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub excluded_reason: Option<String>,
}

/// Shared by carrier and platform errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageErrorData {
    #[serde(flatten)]
    pub base: EventBase,
    /// Numeric carrier codes are kept as their decimal text
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error_type: Option<String>,
}

/// Contact details attached to an unsubscribe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactData {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: ExtensionData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactUnsubscribedData {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub unsubscribed_at: Option<String>,
    #[serde(default)]
    pub contact_data: Option<ContactData>,
}

/// A CloudContact webhook delivery.
///
/// Unknown `eventType` values are not an error: they come back as
/// [`CloudContactEvent::Unrecognized`] with the raw `data` so the caller can
/// log and move on.
#[derive(Debug, Clone, PartialEq)]
pub enum CloudContactEvent {
    MessageSent(MessageSentData),
    MessageIncoming(MessageIncomingData),
    MessageExcluded(MessageExcludedData),
    CarrierError(MessageErrorData),
    CloudContactError(MessageErrorData),
    ContactUnsubscribed(ContactUnsubscribedData),
    Unrecognized {
        event_type: String,
        /// Raw `data` value, `Null` if absent
        data: Value,
    },
}

impl CloudContactEvent {
    /// The `eventType` discriminant.
    #[must_use]
    pub fn event_type(&self) -> &str {
        match self {
            Self::MessageSent(_) => MESSAGE_SENT,
            Self::MessageIncoming(_) => MESSAGE_INCOMING,
            Self::MessageExcluded(_) => MESSAGE_EXCLUDED,
            Self::CarrierError(_) => CARRIER_ERROR,
            Self::CloudContactError(_) => CLOUDCONTACT_ERROR,
            Self::ContactUnsubscribed(_) => CONTACT_UNSUBSCRIBED,
            Self::Unrecognized { event_type, .. } => event_type,
        }
    }

    /// Shared fields; `None` only for unrecognized events.
    #[must_use]
    pub const fn base(&self) -> Option<&EventBase> {
        match self {
            Self::MessageSent(d) => Some(&d.base),
            Self::MessageIncoming(d) => Some(&d.base),
            Self::MessageExcluded(d) => Some(&d.base),
            Self::CarrierError(d) | Self::CloudContactError(d) => Some(&d.base),
            Self::ContactUnsubscribed(d) => Some(&d.base),
            Self::Unrecognized { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized { .. })
    }

    #[must_use]
    pub fn sms_sid(&self) -> Option<&FlexibleId> {
        self.base().and_then(|b| b.sms_sid.as_ref())
    }

    #[must_use]
    pub fn campaign_id(&self) -> Option<&FlexibleId> {
        self.base().and_then(|b| b.campaign_id.as_ref())
    }

    #[must_use]
    pub const fn segments(&self) -> Option<u32> {
        match self {
            Self::MessageSent(d) => d.segments,
            _ => None,
        }
    }

    #[must_use]
    pub const fn total_price(&self) -> Option<f64> {
        match self {
            Self::MessageSent(d) => d.total_price,
            _ => None,
        }
    }

    #[must_use]
    pub fn from_number(&self) -> Option<&str> {
        match self {
            Self::MessageIncoming(d) => d.from.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn excluded_reason(&self) -> Option<&str> {
        match self {
            Self::MessageExcluded(d) => d.excluded_reason.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.error_data().and_then(|d| d.error_code.as_deref())
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_data().and_then(|d| d.error_message.as_deref())
    }

    #[must_use]
    pub fn error_type(&self) -> Option<&str> {
        self.error_data().and_then(|d| d.error_type.as_deref())
    }

    #[must_use]
    pub fn unsubscribed_at(&self) -> Option<&str> {
        match self {
            Self::ContactUnsubscribed(d) => d.unsubscribed_at.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub const fn contact_data(&self) -> Option<&ContactData> {
        match self {
            Self::ContactUnsubscribed(d) => d.contact_data.as_ref(),
            _ => None,
        }
    }

    const fn error_data(&self) -> Option<&MessageErrorData> {
        match self {
            Self::CarrierError(d) | Self::CloudContactError(d) => Some(d),
            _ => None,
        }
    }
}

/// Parses a CloudContact payload of the form `{"eventType": ..., "data": {...}}`.
///
/// # Errors
///
/// - [`WebhookError::EmptyPayload`] for blank input
/// - [`WebhookError::InvalidJson`] if the input is not JSON
/// - [`WebhookError::MissingEventType`] if `eventType` is absent
/// - [`WebhookError::MissingData`] if a known event has no `data` object
/// - [`WebhookError::Decode`] if `data` does not fit the event
///
/// # Example
///
/// ```
/// use ccai::webhook::parse_cloudcontact_event;
///
/// let event = parse_cloudcontact_event(
///     r#"{"eventType":"message.sent","data":{"SmsSid":12345,"Segments":2,"TotalPrice":0.02}}"#,
/// )
/// .unwrap();
///
/// assert_eq!(event.sms_sid().unwrap(), "12345");
/// assert_eq!(event.segments(), Some(2));
/// ```
pub fn parse_cloudcontact_event(json: &str) -> Result<CloudContactEvent, WebhookError> {
    if json.trim().is_empty() {
        return Err(WebhookError::EmptyPayload);
    }
    let value: Value = serde_json::from_str(json).map_err(WebhookError::InvalidJson)?;
    let Value::Object(mut envelope) = value else {
        return Err(WebhookError::MissingEventType);
    };
    let event_type = match envelope.remove("eventType") {
        Some(Value::String(event_type)) => event_type,
        _ => return Err(WebhookError::MissingEventType),
    };
    let data = envelope.remove("data");

    match event_type.as_str() {
        MESSAGE_SENT => decode(&event_type, data).map(CloudContactEvent::MessageSent),
        MESSAGE_INCOMING => decode(&event_type, data).map(CloudContactEvent::MessageIncoming),
        MESSAGE_EXCLUDED => decode(&event_type, data).map(CloudContactEvent::MessageExcluded),
        CARRIER_ERROR => decode(&event_type, data).map(CloudContactEvent::CarrierError),
        CLOUDCONTACT_ERROR => decode(&event_type, data).map(CloudContactEvent::CloudContactError),
        CONTACT_UNSUBSCRIBED => {
            decode(&event_type, data).map(CloudContactEvent::ContactUnsubscribed)
        }
        _ => {
            tracing::warn!("Unrecognized CloudContact event type '{event_type}'");
            Ok(CloudContactEvent::Unrecognized {
                event_type,
                data: data.unwrap_or(Value::Null),
            })
        }
    }
}

fn decode<T: DeserializeOwned>(event_type: &str, data: Option<Value>) -> Result<T, WebhookError> {
    let data: Map<String, Value> = match data {
        Some(Value::Object(data)) => data,
        _ => return Err(WebhookError::MissingData),
    };
    T::deserialize(Value::Object(data)).map_err(|source| WebhookError::Decode {
        event_type: event_type.to_string(),
        source,
    })
}
