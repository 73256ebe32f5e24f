//! ccai: CloudContactAI client SDK
//!
//! A library for sending SMS, MMS and email campaigns through the
//! CloudContactAI platform, managing webhook registrations, and verifying
//! and parsing the webhook deliveries it sends back.
//!
//! # Example
//!
//! ```no_run
//! use ccai::client::{CcaiClient, SendOptions};
//! use ccai::config::ClientConfig;
//! use ccai::sms::Account;
//!
//! # async fn send() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CcaiClient::new(ClientConfig::new("1231", "api-key")?);
//!
//! let response = client
//!     .sms()
//!     .send_single(
//!         Account::new("John", "Doe", "+15551234567"),
//!         "Hello ${FirstName}!",
//!         "Greeting",
//!         &SendOptions::new(),
//!     )
//!     .await?;
//!
//! println!("campaign {:?}", response.campaign_id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod email;
pub mod id;
pub mod sms;
pub mod transport;
pub mod webhook;

#[cfg(test)]
mod test_support;
