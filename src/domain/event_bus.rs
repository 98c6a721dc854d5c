//! Lifecycle fan-out for status sockets.
//!
//! Socket tasks publish into [`EventBus`]; the facade hands out receivers
//! through [`crate::PublisherService::subscribe_lifecycle`].

use tokio::sync::broadcast;

use super::SocketEvent;

/// Broadcast bus for [`SocketEvent`]s.
///
/// Events published while nobody is subscribed are lost. A receiver that
/// falls more than `capacity` events behind skips the oldest ones.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SocketEvent>,
}

impl EventBus {
    /// Creates a bus buffering up to `capacity` events per receiver.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes `event` to every current subscriber.
    pub fn publish(&self, event: SocketEvent) {
        if let Err(broadcast::error::SendError(event)) = self.sender.send(event) {
            tracing::trace!(socket_id = %event.socket_id(), "no lifecycle subscribers");
        }
    }

    /// Returns a receiver for events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SocketEvent> {
        self.sender.subscribe()
    }
}
