//! Webhook management and inbound payload handling.
//!
//! This module provides:
//! - Registration CRUD ([`WebhookService`], [`WebhookConfig`])
//! - Signature verification ([`verify_signature`], [`sign_payload`])
//! - Two payload parsers with separate result types:
//!   [`parse_legacy_event`] for `type`-tagged deliveries and
//!   [`parse_cloudcontact_event`] for `eventType` + `data` deliveries
//!
//! Verification and parsing are pure functions; receiving the HTTP request
//! is left to the caller's server.
//!
//! # Example
//!
//! ```
//! use ccai::webhook::{CloudContactEvent, parse_cloudcontact_event, sign_payload, verify_signature};
//!
//! let body = r#"{"eventType":"message.error.carrier","data":{"ErrorCode":"30008"}}"#;
//! let signature = sign_payload(body, "whsec").unwrap();
//!
//! if verify_signature(&signature, body, "whsec") {
//!     let event = parse_cloudcontact_event(body).unwrap();
//!     assert!(matches!(event, CloudContactEvent::CarrierError(_)));
//!     assert_eq!(event.error_code(), Some("30008"));
//! }
//! ```

mod cloudcontact;
mod error;
mod legacy;
mod service;
mod signature;
mod types;


pub use cloudcontact::{
    CloudContactEvent, ContactData, ContactUnsubscribedData, EventBase, MessageErrorData,
    MessageExcludedData, MessageIncomingData, MessageSentData, parse_cloudcontact_event,
};
pub use error::WebhookError;
pub use legacy::{MessageEvent, WebhookCampaign, WebhookEvent, parse_legacy_event};
pub use service::WebhookService;
pub use signature::{SIGNATURE_HEADER, sign_payload, verify_signature};
pub use types::{WebhookConfig, WebhookDeleteResponse, WebhookEventType, WebhookRegistration};
