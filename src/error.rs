//! Client error types.
//!
//! [`ClientError`] is what every HTTP-backed facade operation returns. Its
//! message is always display-ready: either the backend's `detail` text or a
//! fixed fallback for the operation. [`BackendFailure`] keeps the
//! transport/backend distinction long enough to be logged, then collapses
//! into a [`ClientError`].

use crate::api::operation::Operation;

/// Error returned by facade operations.
///
/// `Display` yields the message verbatim so it can be shown to a user
/// without further formatting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The broker connection request failed.
    #[error("{message}")]
    Connection {
        /// Human-readable failure message.
        message: String,
    },

    /// Any other backend request failed.
    #[error("{message}")]
    Request {
        /// Human-readable failure message.
        message: String,
    },

    /// The backend reported success but its body did not match the
    /// expected contract. The operation itself went through.
    #[error("{message}")]
    UnexpectedResponse {
        /// Human-readable failure message.
        message: String,
    },
}

impl ClientError {
    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Connection { message }
            | Self::Request { message }
            | Self::UnexpectedResponse { message } => message,
        }
    }

    /// Returns `true` for broker connection failures.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    /// Returns `true` when the backend succeeded but sent an unexpected body.
    #[must_use]
    pub const fn is_unexpected_response(&self) -> bool {
        matches!(self, Self::UnexpectedResponse { .. })
    }
}

/// Why a backend call failed, before normalization.
///
/// | Variant     | Meaning                                             |
/// |-------------|-----------------------------------------------------|
/// | `Transport` | backend unreachable, or the exchange broke mid-way  |
/// | `Backend`   | backend answered with a non-success status          |
/// | `Decode`    | backend answered success with an unexpected body    |
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendFailure {
    /// Network-level failure; no usable response.
    #[error("transport error: {reason}")]
    Transport {
        /// Underlying transport error text.
        reason: String,
    },

    /// The backend responded with a failure status.
    #[error("backend returned {status}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Text extracted from the `detail` field, if any.
        detail: Option<String>,
    },

    /// The success body did not match the expected contract.
    #[error("undecodable response: {reason}")]
    Decode {
        /// Decoder error text.
        reason: String,
    },
}

impl BackendFailure {
    /// Collapses this failure into the error shape callers see.
    ///
    /// Only a backend-supplied detail survives; everything else becomes the
    /// operation's fallback message. A `Decode` failure keeps its own
    /// variant since the backend did carry out the operation.
    #[must_use]
    pub fn into_client_error(self, operation: Operation) -> ClientError {
        match self {
            Self::Backend {
                detail: Some(detail),
                ..
            } => operation.error(detail),
            Self::Decode { .. } => ClientError::UnexpectedResponse {
                message: operation.fallback_message().to_string(),
            },
            Self::Backend { detail: None, .. } | Self::Transport { .. } => {
                operation.error(operation.fallback_message())
            }
        }
    }
}

/// Configuration and client construction failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A URL setting could not be parsed.
    #[error("invalid {key} {value:?}: {reason}")]
    InvalidUrl {
        /// Setting name.
        key: &'static str,
        /// Raw value.
        value: String,
        /// Parser error text.
        reason: String,
    },

    /// The URL scheme has no HTTP/WebSocket mapping.
    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),

    /// The HTTP client could not be built.
    #[error("http client: {0}")]
    HttpClient(String),
}
