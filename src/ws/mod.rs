//! WebSocket layer: the status push socket.
//!
//! The backend pushes JSON status updates on `/ws/status`; the client never
//! sends application messages on it.

pub mod connection;
pub mod handle;
pub mod messages;

pub use handle::SocketHandle;
pub use messages::{PublishedMessage, StatusEvent, StatusUpdate};
