//! Error types for API calls.

use std::path::PathBuf;

use thiserror::Error;

use crate::transport::TransportError;

/// A request parameter failed validation before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Missing {
        /// Human-readable field name
        field: &'static str,
    },

    /// A list that must have at least one element is empty.
    #[error("At least one {item} is required")]
    Empty {
        /// Human-readable element name
        item: &'static str,
    },

    /// A field of one element in a list is missing.
    #[error("{field} is required for account at index {index}")]
    InvalidAccount {
        /// Position of the offending account
        index: usize,
        /// Human-readable field name
        field: &'static str,
    },

    /// A file referenced by the call does not exist.
    #[error("File does not exist: {}", .0.display())]
    FileNotFound(PathBuf),
}

/// Error type for API calls made through [`super::CcaiClient`].
///
/// `Validation` is the only variant raised before I/O; every other
/// variant describes what happened on or after the wire. Executor errors
/// reach the caller untranslated.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request parameters were rejected locally.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status
        status: http::StatusCode,
        /// Raw response body
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The response body was empty or JSON `null`.
    #[error("Failed to decode response: body was empty")]
    EmptyResponse,

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The caller's cancellation token fired.
    #[error("Request cancelled")]
    Cancelled,

    /// The call's timeout elapsed first.
    #[error("Request timed out")]
    TimedOut,

    /// The resolved request URL is invalid.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// A caller-supplied header name or value is invalid.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader {
        /// Header name as supplied
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// No response could be obtained.
    #[error(transparent)]
    Transport(TransportError),

    /// A local file could not be read.
    #[error("Failed to read file '{}': {source}", path.display())]
    FileRead {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The signed-URL upload answered with a non-2xx status.
    #[error("Failed to upload file to signed URL")]
    UploadFailed,
}

impl ClientError {
    /// Returns the HTTP status for [`ClientError::Http`].
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for failures raised before any network activity.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<TransportError> for ClientError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Timeout => Self::TimedOut,
            other => Self::Transport(other),
        }
    }
}
