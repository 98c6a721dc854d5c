//! Type-safe status socket identifier.
//!
//! [`SocketId`] is a newtype wrapper around [`uuid::Uuid`] (v4) so socket
//! identifiers cannot be confused with other UUIDs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for one status socket.
///
/// Generated each time the facade opens a socket. Tags every
/// [`super::SocketEvent`] so observers can tell a replaced socket's events
/// from the current one's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SocketId(uuid::Uuid);

impl SocketId {
    /// Creates a new random `SocketId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SocketId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SocketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for SocketId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}
