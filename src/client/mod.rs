//! The request pipeline every service goes through.
//!
//! This module provides:
//! - The per-call request description ([`ApiRequest`])
//! - The authenticated executor ([`CcaiClient`])
//! - Before-I/O and after-I/O error types ([`ValidationError`], [`ClientError`])
//! - Preserved vendor fields on responses ([`ExtensionData`])
//! - Timeout, cancellation and progress for sends ([`SendOptions`])

mod error;
mod executor;
mod progress;
mod request;
mod response;

#[cfg(test)]
mod executor_tests;

pub use error::{ClientError, ValidationError};
pub use executor::CcaiClient;
pub use progress::{ProgressFn, SendOptions};
pub use request::ApiRequest;
pub use response::ExtensionData;
