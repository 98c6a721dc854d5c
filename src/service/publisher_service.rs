//! Publisher service: the facade between views and the remote backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use reqwest::Url;
use tokio::sync::{broadcast, watch};

use crate::api::dto::{
    BrokerAck, BrokerConfig, DataInfo, PublishConfig, PublishReset, PublishStarted, PublishStatus,
    PublishStopped, ServiceInfo,
};
use crate::api::{HttpTransport, Operation};
use crate::config::ClientConfig;
use crate::domain::{EventBus, SocketEvent, SocketId};
use crate::error::{ClientError, ConfigError};
use crate::ws::connection::run_status_socket;
use crate::ws::{SocketHandle, StatusEvent};

/// Facade over the publisher backend.
///
/// Each HTTP operation is one request; failures arrive as a [`ClientError`]
/// carrying a display-ready message. The connected flag is bookkeeping only:
/// no operation consults it, and the backend stays the source of truth.
///
/// Construct one per application at the composition root and share it
/// behind an `Arc`.
#[derive(Debug)]
pub struct PublisherService {
    transport: HttpTransport,
    status_socket_url: Url,
    connected: AtomicBool,
    socket: Mutex<Option<SocketHandle>>,
    lifecycle: EventBus,
}

impl PublisherService {
    /// Creates a new `PublisherService`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the HTTP client cannot be built.
    /// A lifecycle capacity of zero is raised to one.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            transport: HttpTransport::new(&config.api_url, config.request_timeout)?,
            status_socket_url: config.status_socket_url.clone(),
            connected: AtomicBool::new(false),
            socket: Mutex::new(None),
            lifecycle: EventBus::new(config.lifecycle_capacity),
        })
    }

    /// Returns the connected flag.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Asks the backend to connect to the MQTT broker at `broker:port`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connection`] with the backend's detail text,
    /// or `"Connection failed"` when none is supplied. A success response
    /// with an unreadable body yields [`ClientError::UnexpectedResponse`];
    /// the connected flag is still set in that case.
    pub async fn connect(&self, broker: &str, port: u16) -> Result<BrokerAck, ClientError> {
        self.connect_with(&BrokerConfig::new(broker, port)).await
    }

    /// Like [`PublisherService::connect`], with optional credentials.
    ///
    /// # Errors
    ///
    /// Same as [`PublisherService::connect`].
    pub async fn connect_with(&self, broker: &BrokerConfig) -> Result<BrokerAck, ClientError> {
        let result = self
            .transport
            .send_json::<_, BrokerAck>(Operation::Connect, broker)
            .await;
        if matches!(&result, Ok(_) | Err(ClientError::UnexpectedResponse { .. })) {
            self.connected.store(true, Ordering::SeqCst);
            tracing::info!(broker = %broker.broker, port = broker.port, "broker connected");
        }
        result
    }

    /// Clears the connected flag and closes the tracked status socket.
    ///
    /// Synchronous and infallible; safe to call in any state. The backend's
    /// broker connection is left alone (see
    /// [`PublisherService::disconnect_broker`]).
    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
        if let Some(handle) = self.socket_slot().take() {
            tracing::debug!(socket_id = %handle.id(), "closing status socket");
            handle.close();
        }
    }

    /// Asks the backend to drop its broker connection, then disconnects
    /// locally.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`] if the backend call fails; local
    /// state is left untouched in that case.
    pub async fn disconnect_broker(&self) -> Result<BrokerAck, ClientError> {
        let ack = self.transport.send(Operation::BrokerDisconnect).await?;
        self.disconnect();
        tracing::info!("broker disconnected");
        Ok(ack)
    }

    /// Fetches the sensor data descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`] on network or backend failure.
    pub async fn get_data_info(&self) -> Result<DataInfo, ClientError> {
        self.transport.send(Operation::DataInfo).await
    }

    /// Starts (or resumes) the replay with `config`, forwarded as-is.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`] on network or backend failure.
    pub async fn start_publish(
        &self,
        config: &PublishConfig,
    ) -> Result<PublishStarted, ClientError> {
        let ack: PublishStarted = self.transport.send_json(Operation::StartPublish, config).await?;
        tracing::info!(
            start_index = ack.start_index,
            remaining = ack.remaining,
            "publish started"
        );
        Ok(ack)
    }

    /// Stops the running replay.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`] on network or backend failure.
    pub async fn stop_publish(&self) -> Result<PublishStopped, ClientError> {
        self.transport.send(Operation::StopPublish).await
    }

    /// Rewinds replay progress to the first record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`] on network or backend failure.
    pub async fn reset_publish(&self) -> Result<PublishReset, ClientError> {
        self.transport.send(Operation::ResetPublish).await
    }

    /// Fetches the backend's replay status.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`] on network or backend failure.
    pub async fn publish_status(&self) -> Result<PublishStatus, ClientError> {
        self.transport.send(Operation::PublishStatus).await
    }

    /// Fetches the backend's service banner.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`] on network or backend failure.
    pub async fn service_info(&self) -> Result<ServiceInfo, ClientError> {
        self.transport.send(Operation::ServiceInfo).await
    }

    /// Opens the status socket and delivers each decoded payload to
    /// `on_message`.
    ///
    /// Returns immediately; connection, decoding, and closure happen on a
    /// spawned task and are reported only through logs and
    /// [`PublisherService::subscribe_lifecycle`]. Subscribe before calling
    /// this to observe `Opened`.
    ///
    /// A socket opened by an earlier call is no longer tracked but is not
    /// closed either: it keeps delivering to its own handler until the
    /// server closes it.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn connect_websocket<F>(&self, on_message: F) -> SocketId
    where
        F: FnMut(StatusEvent) + Send + 'static,
    {
        let socket_id = SocketId::new();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(run_status_socket(
            socket_id,
            self.status_socket_url.clone(),
            on_message,
            self.lifecycle.clone(),
            shutdown_rx,
        ));

        let previous = self
            .socket_slot()
            .replace(SocketHandle::new(socket_id, shutdown_tx, task));
        if let Some(previous) = previous
            && !previous.is_finished()
        {
            tracing::warn!(
                previous = %previous.id(),
                current = %socket_id,
                "status socket replaced while open; previous socket left running"
            );
        }

        socket_id
    }

    /// Subscribes to status socket lifecycle events.
    #[must_use]
    pub fn subscribe_lifecycle(&self) -> broadcast::Receiver<SocketEvent> {
        self.lifecycle.subscribe()
    }

    /// Returns the tracked status socket, if any.
    #[must_use]
    pub fn active_socket(&self) -> Option<SocketId> {
        self.socket_slot().as_ref().map(SocketHandle::id)
    }

    fn socket_slot(&self) -> MutexGuard<'_, Option<SocketHandle>> {
        self.socket.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn service() -> PublisherService {
        let Ok(config) = ClientConfig::for_base_url("http://127.0.0.1:9") else {
            panic!("config must parse");
        };
        let Ok(service) = PublisherService::new(&config) else {
            panic!("service must build");
        };
        service
    }

    #[tokio::test]
    async fn starts_disconnected_without_socket() {
        let service = service();
        assert!(!service.is_connected());
        assert!(service.active_socket().is_none());
    }

    #[tokio::test]
    async fn zero_lifecycle_capacity_is_raised() {
        let Ok(mut config) = ClientConfig::for_base_url("http://127.0.0.1:9") else {
            panic!("config must parse");
        };
        config.lifecycle_capacity = 0;
        let Ok(service) = PublisherService::new(&config) else {
            panic!("service must build");
        };
        let mut lifecycle = service.subscribe_lifecycle();
        let id = service.connect_websocket(|_| {});
        let Ok(Ok(event)) =
            tokio::time::timeout(std::time::Duration::from_secs(5), lifecycle.recv()).await
        else {
            panic!("expected a lifecycle event");
        };
        assert_eq!(event.socket_id(), id);
    }

    #[tokio::test]
    async fn disconnect_without_socket_is_noop() {
        let service = service();
        service.disconnect();
        service.disconnect();
        assert!(!service.is_connected());
        assert!(service.active_socket().is_none());
    }

    #[tokio::test]
    async fn connect_websocket_tracks_latest_socket() {
        let service = service();
        let first = service.connect_websocket(|_| {});
        assert_eq!(service.active_socket(), Some(first));

        let second = service.connect_websocket(|_| {});
        assert_ne!(first, second);
        assert_eq!(service.active_socket(), Some(second));

        service.disconnect();
        assert!(service.active_socket().is_none());
    }

    #[tokio::test]
    async fn unreachable_socket_reports_error_then_close() {
        let service = service();
        let mut lifecycle = service.subscribe_lifecycle();
        let id = service.connect_websocket(|_| {});

        let Ok(Ok(first)) =
            tokio::time::timeout(std::time::Duration::from_secs(5), lifecycle.recv()).await
        else {
            panic!("expected a lifecycle event");
        };
        assert!(matches!(first, SocketEvent::Errored { socket_id, .. } if socket_id == id));

        let Ok(Ok(second)) =
            tokio::time::timeout(std::time::Duration::from_secs(5), lifecycle.recv()).await
        else {
            panic!("expected a lifecycle event");
        };
        assert!(second.is_closed());
        assert_eq!(second.socket_id(), id);
    }
}
