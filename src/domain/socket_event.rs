//! Status socket lifecycle events.
//!
//! The socket task publishes a [`SocketEvent`] through the
//! [`super::EventBus`] at every lifecycle step. None of these reach the
//! message handler; they exist so callers can observe liveness.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::SocketId;

/// Lifecycle step of a status socket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum SocketEvent {
    /// The WebSocket handshake completed.
    Opened {
        /// Socket identifier.
        socket_id: SocketId,
        /// URL the socket connected to.
        url: String,
        /// Event timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A frame could not be decoded; the handler was not invoked.
    Malformed {
        /// Socket identifier.
        socket_id: SocketId,
        /// Decoder error text.
        reason: String,
        /// Event timestamp.
        timestamp: DateTime<Utc>,
    },

    /// The connection attempt or an established stream failed.
    Errored {
        /// Socket identifier.
        socket_id: SocketId,
        /// Transport error text.
        reason: String,
        /// Event timestamp.
        timestamp: DateTime<Utc>,
    },

    /// The socket is gone. Always the last event for a socket.
    Closed {
        /// Socket identifier.
        socket_id: SocketId,
        /// Close code from the peer's close frame, if one was received.
        code: Option<u16>,
        /// Close reason text (may be empty).
        reason: String,
        /// Event timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl SocketEvent {
    /// Returns the socket this event belongs to.
    #[must_use]
    pub const fn socket_id(&self) -> SocketId {
        match self {
            Self::Opened { socket_id, .. }
            | Self::Malformed { socket_id, .. }
            | Self::Errored { socket_id, .. }
            | Self::Closed { socket_id, .. } => *socket_id,
        }
    }

    /// Returns `true` for [`SocketEvent::Closed`].
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed { .. })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_event_type_tag() {
        let event = SocketEvent::Closed {
            socket_id: SocketId::new(),
            code: Some(1000),
            reason: String::new(),
            timestamp: Utc::now(),
        };
        let Ok(value) = serde_json::to_value(&event) else {
            panic!("serialization failed");
        };
        assert_eq!(value["event_type"], "closed");
        assert_eq!(value["code"], 1000);
        assert!(event.is_closed());
    }

    #[test]
    fn socket_id_accessor() {
        let id = SocketId::new();
        let event = SocketEvent::Malformed {
            socket_id: id,
            reason: "expected value".to_string(),
            timestamp: Utc::now(),
        };
        assert_eq!(event.socket_id(), id);
        assert!(!event.is_closed());
    }
}
