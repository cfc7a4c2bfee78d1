//! Error types for the task-list client

use thiserror::Error;

/// Errors returned by a [`TodoApi`](crate::api::TodoApi) call
///
/// Every variant renders to the message shown in the view's error region.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a status outside the success range
    #[error("{message}")]
    RequestFailed {
        /// Human-readable description of the failed operation
        message: String,
        /// HTTP status code
        status: u16,
    },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Transport(String),

    /// The response body did not match the expected record shape
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Creates a `RequestFailed` error
    #[must_use]
    pub fn request_failed(message: impl Into<String>, status: u16) -> Self {
        Self::RequestFailed {
            message: message.into(),
            status,
        }
    }

    /// HTTP status code, if the server answered at all
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

/// Errors raised while building a [`ClientConfig`](crate::config::ClientConfig)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The base URL could not be parsed
    #[error("Invalid API URL {url:?}: {reason}")]
    InvalidUrl {
        /// Offending value
        url: String,
        /// Parser message
        reason: String,
    },

    /// The base URL uses a scheme other than http or https
    #[error("Unsupported API URL scheme {scheme:?} (expected http or https)")]
    UnsupportedScheme {
        /// Offending scheme
        scheme: String,
    },
}
