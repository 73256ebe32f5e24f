//! Error types for the transport layer.

use thiserror::Error;

/// Error type for a single HTTP exchange.
///
/// Covers failures where no HTTP response was obtained at all. A response
/// with a non-2xx status is *not* a transport error; the executor turns it
/// into [`crate::client::ClientError::Http`].
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS failures and errors while reading the response body.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The transport's own timeout elapsed before a response arrived.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built (bad URL, bad header).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
