//! Transport layer: raw HTTP exchange with the CloudContactAI hosts.
//!
//! This module provides:
//! - Fully-built outbound requests ([`HttpRequest`])
//! - Fully-buffered responses ([`HttpResponse`])
//! - The transport seam every API call goes through ([`HttpClient`])
//! - The production transport on top of reqwest ([`ReqwestClient`])
//!
//! Nothing here knows about credentials or JSON; that is the job of
//! [`crate::client::CcaiClient`].

mod client;
mod error;
mod http;


pub use client::{ReqwestClient, USER_AGENT};
pub use error::TransportError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
