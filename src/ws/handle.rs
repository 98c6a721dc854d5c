//! Owned handle to a running status socket task.

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::SocketId;

/// The facade's reference to one status socket.
///
/// Closing sends a shutdown signal; the task then sends a close frame and
/// publishes `Closed`. Dropping the handle without closing leaves the task
/// running until the server ends the stream.
#[derive(Debug)]
pub struct SocketHandle {
    id: SocketId,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SocketHandle {
    pub(crate) fn new(id: SocketId, shutdown: watch::Sender<bool>, task: JoinHandle<()>) -> Self {
        Self { id, shutdown, task }
    }

    /// Socket identifier.
    #[must_use]
    pub const fn id(&self) -> SocketId {
        self.id
    }

    /// Returns `true` once the socket task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Asks the socket task to close the connection. Never blocks.
    pub fn close(self) {
        // An exited task has dropped its receiver; nothing left to close.
        let _ = self.shutdown.send(true);
    }
}
