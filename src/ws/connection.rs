//! Status socket task.
//!
//! Connects once, then forwards every decoded frame to the caller's handler
//! until the server closes the stream or the facade asks it to close.
//! Failures are logged and published as [`SocketEvent`]s, never returned.

use std::panic::{AssertUnwindSafe, catch_unwind};

use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use reqwest::Url;
use tokio::sync::watch;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use super::messages::StatusEvent;
use crate::domain::{EventBus, SocketEvent, SocketId};

/// Runs one status socket to completion.
///
/// Publishes `Opened` after the handshake and exactly one `Closed` at the
/// end, with `Errored`/`Malformed` in between as they happen.
pub(crate) async fn run_status_socket<F>(
    socket_id: SocketId,
    url: Url,
    mut on_message: F,
    lifecycle: EventBus,
    mut shutdown: watch::Receiver<bool>,
) where
    F: FnMut(StatusEvent) + Send + 'static,
{
    let stream = match connect_async(url.as_str()).await {
        Ok((stream, _response)) => stream,
        Err(e) => {
            tracing::error!(%socket_id, %url, error = %e, "status socket error");
            lifecycle.publish(SocketEvent::Errored {
                socket_id,
                reason: e.to_string(),
                timestamp: Utc::now(),
            });
            publish_closed(&lifecycle, socket_id, None, String::new());
            return;
        }
    };

    tracing::info!(%socket_id, %url, "status socket connected");
    lifecycle.publish(SocketEvent::Opened {
        socket_id,
        url: url.to_string(),
        timestamp: Utc::now(),
    });

    let (mut ws_tx, mut ws_rx) = stream.split();
    let mut detached = false;

    let (code, reason) = loop {
        tokio::select! {
            // Shutdown signal from the facade
            changed = shutdown.changed(), if !detached => {
                if changed.is_err() {
                    // Handle replaced without close; keep reading until the server hangs up.
                    tracing::debug!(%socket_id, "status socket detached from facade");
                    detached = true;
                    continue;
                }
                let requested = *shutdown.borrow_and_update();
                if requested {
                    let _ = ws_tx.send(Message::Close(None)).await;
                    break (None, "closed by client".to_string());
                }
            }
            // Frame from the backend
            frame = ws_rx.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        dispatch(socket_id, text.as_str(), &mut on_message, &lifecycle);
                    }
                    Some(Ok(Message::Binary(bytes))) => match std::str::from_utf8(&bytes) {
                        Ok(text) => dispatch(socket_id, text, &mut on_message, &lifecycle),
                        Err(e) => report_malformed(&lifecycle, socket_id, e.to_string()),
                    },
                    Some(Ok(Message::Close(frame))) => {
                        let (code, reason) = match frame {
                            Some(frame) => {
                                (Some(u16::from(frame.code)), frame.reason.as_str().to_owned())
                            }
                            None => (None, String::new()),
                        };
                        // Flushes the queued close reply.
                        let _ = ws_tx.close().await;
                        break (code, reason);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!(%socket_id, error = %e, "status socket error");
                        lifecycle.publish(SocketEvent::Errored {
                            socket_id,
                            reason: e.to_string(),
                            timestamp: Utc::now(),
                        });
                        break (None, String::new());
                    }
                    None => break (None, String::new()),
                }
            }
        }
    };

    publish_closed(&lifecycle, socket_id, code, reason);
}

/// Decodes one frame and hands it to the handler.
///
/// Malformed frames and handler panics are logged and swallowed.
fn dispatch<F>(socket_id: SocketId, text: &str, on_message: &mut F, lifecycle: &EventBus)
where
    F: FnMut(StatusEvent),
{
    match StatusEvent::decode(text) {
        Ok(event) => {
            if catch_unwind(AssertUnwindSafe(|| on_message(event))).is_err() {
                tracing::error!(%socket_id, "status handler panicked");
            }
        }
        Err(e) => report_malformed(lifecycle, socket_id, e.to_string()),
    }
}

fn report_malformed(lifecycle: &EventBus, socket_id: SocketId, reason: String) {
    tracing::error!(%socket_id, error = %reason, "failed to parse status message");
    lifecycle.publish(SocketEvent::Malformed {
        socket_id,
        reason,
        timestamp: Utc::now(),
    });
}

fn publish_closed(lifecycle: &EventBus, socket_id: SocketId, code: Option<u16>, reason: String) {
    tracing::info!(%socket_id, code = ?code, "status socket disconnected");
    lifecycle.publish(SocketEvent::Closed {
        socket_id,
        code,
        reason,
        timestamp: Utc::now(),
    });
}
