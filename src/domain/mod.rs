//! Domain layer: socket identity, lifecycle events, and the event bus.

pub mod event_bus;
pub mod socket_event;
pub mod socket_id;

pub use event_bus::EventBus;
pub use socket_event::SocketEvent;
pub use socket_id::SocketId;
