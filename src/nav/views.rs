//! Page-level views reachable through the route table.

use std::ops::ControlFlow;

use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};

use crate::app_state::AppState;
use crate::domain::SocketEvent;
use crate::ws::{StatusEvent, StatusUpdate};

/// A page the application can navigate to.
#[async_trait]
pub trait View: Send + Sync {
    /// Renders the view until it is done.
    ///
    /// # Errors
    ///
    /// Returns an error if a backend call fails or the status socket
    /// cannot be used.
    async fn render(&self, state: &AppState) -> anyhow::Result<()>;
}

/// Root page: service, data set, and replay status at a glance.
#[derive(Debug, Default, Clone, Copy)]
pub struct PublisherView;

#[async_trait]
impl View for PublisherView {
    async fn render(&self, state: &AppState) -> anyhow::Result<()> {
        let service = &state.service;

        let info = service.service_info().await?;
        println!("{} {} ({})", info.service, info.version, info.status);

        let data = service.get_data_info().await?;
        println!(
            "records: {} aligned (temperature {}, humidity {}, pressure {})",
            data.total_records, data.temperature_count, data.humidity_count, data.pressure_count
        );
        if let (Some(start), Some(end)) = (&data.date_range.start, &data.date_range.end) {
            println!("range:   {start} .. {end}");
        }

        let status = service.publish_status().await?;
        println!(
            "replay:  {} | {}/{} published, {} skipped, {:.1}%",
            if status.is_publishing { "running" } else { "idle" },
            status.published_count,
            status.total_records,
            status.skipped_count,
            status.progress
        );
        Ok(())
    }
}

/// Prints every sensor message the backend publishes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubscriberView;

#[async_trait]
impl View for SubscriberView {
    async fn render(&self, state: &AppState) -> anyhow::Result<()> {
        stream_status(
            state,
            |event| {
                for message in event.published_messages() {
                    println!(
                        "{}  {:<20} {}",
                        message.timestamp, message.topic, message.value
                    );
                }
                ControlFlow::Continue(())
            },
            |_| {},
        )
        .await
    }
}

/// Follows replay progress and socket liveness until the replay ends.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonitorView;

#[async_trait]
impl View for MonitorView {
    async fn render(&self, state: &AppState) -> anyhow::Result<()> {
        stream_status(state, render_progress, |event| {
            if let Ok(line) = serde_json::to_string(event) {
                println!("socket: {line}");
            }
        })
        .await
    }
}

fn render_progress(event: &StatusEvent) -> ControlFlow<()> {
    match event {
        StatusEvent::Update(StatusUpdate::Progress {
            published,
            total,
            progress,
            ..
        }) => println!("[{progress:>6.2}%] {published}/{total}"),
        StatusEvent::Update(StatusUpdate::Stopped {
            published,
            total,
            current_index,
        }) => {
            println!("stopped at {current_index} ({published}/{total})");
            return ControlFlow::Break(());
        }
        StatusEvent::Update(StatusUpdate::Complete { published, total }) => {
            println!("complete: {published}/{total}");
            return ControlFlow::Break(());
        }
        StatusEvent::Update(StatusUpdate::Status {
            is_publishing,
            published,
            total,
            progress,
        }) => println!("status: publishing={is_publishing} {published}/{total} {progress:.1}%"),
        StatusEvent::Snapshot(status) => println!(
            "status: publishing={} {}/{} {:.1}%",
            status.is_publishing, status.published_count, status.total_records, status.progress
        ),
        StatusEvent::Other(value) => println!("event: {value}"),
    }
    ControlFlow::Continue(())
}

/// Opens the status socket and feeds it to `on_status` until that returns
/// `Break`, the socket closes, or Ctrl-C. Disconnects on the way out.
async fn stream_status<S, L>(
    state: &AppState,
    mut on_status: S,
    mut on_lifecycle: L,
) -> anyhow::Result<()>
where
    S: FnMut(&StatusEvent) -> ControlFlow<()> + Send,
    L: FnMut(&SocketEvent) + Send,
{
    let service = &state.service;
    let mut lifecycle = service.subscribe_lifecycle();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let socket_id = service.connect_websocket(move |event| {
        let _ = tx.send(event);
    });

    let mut last_error = None;
    let outcome: anyhow::Result<()> = loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break Ok(()),
            Some(event) = rx.recv() => {
                if on_status(&event).is_break() {
                    break Ok(());
                }
            }
            event = lifecycle.recv() => match event {
                Ok(event) if event.socket_id() == socket_id => {
                    on_lifecycle(&event);
                    match event {
                        SocketEvent::Errored { reason, .. } => last_error = Some(reason),
                        SocketEvent::Closed { .. } => {
                            // Frames delivered before the close may still be queued.
                            while let Ok(event) = rx.try_recv() {
                                if on_status(&event).is_break() {
                                    break;
                                }
                            }
                            break match last_error.take() {
                                Some(reason) => {
                                    Err(anyhow::anyhow!("status socket failed: {reason}"))
                                }
                                None => Ok(()),
                            };
                        }
                        SocketEvent::Opened { .. } | SocketEvent::Malformed { .. } => {}
                    }
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(lagged = n, "lifecycle receiver lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break Ok(()),
            },
        }
    };

    service.disconnect();
    outcome
}
