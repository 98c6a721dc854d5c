//! Mock publisher backend for integration tests.

#![allow(dead_code, clippy::panic)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use publisher_client::{ClientConfig, PublisherService};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use publisher_client::domain::SocketEvent;

/// Upper bound for any single wait in the socket tests.
pub const WAIT: Duration = Duration::from_secs(5);

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_backend(app: Router) -> String {
    let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

/// Returns a base URL with nothing listening behind it.
pub async fn dead_backend() -> String {
    let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    drop(listener);
    format!("http://{addr}")
}

/// Builds a facade pointed at `base`.
pub fn service_for(base: &str) -> PublisherService {
    let Ok(config) = ClientConfig::for_base_url(base) else {
        panic!("config must parse");
    };
    let Ok(service) = PublisherService::new(&config) else {
        panic!("service must build");
    };
    service
}

/// A canned response: status plus optional raw body.
pub fn reply(status: StatusCode, body: Option<&'static str>) -> Response {
    match body {
        Some(body) => (status, [("content-type", "application/json")], body).into_response(),
        None => status.into_response(),
    }
}

/// Slot recording the last JSON body a handler received.
pub type Captured = Arc<Mutex<Option<Value>>>;

/// Stores `body` into `slot`.
pub fn capture(slot: &Captured, body: Value) {
    if let Ok(mut guard) = slot.lock() {
        *guard = Some(body);
    }
}

/// Reads the captured body.
pub fn captured(slot: &Captured) -> Option<Value> {
    slot.lock().ok().and_then(|guard| guard.clone())
}

/// Status socket that pushes `frames` as text, then either closes or
/// stays open until the client hangs up.
pub async fn push_frames(ws: WebSocketUpgrade, frames: Vec<String>, close_after: bool) -> Response {
    ws.on_upgrade(move |socket| serve_frames(socket, frames, close_after))
}

async fn serve_frames(mut socket: WebSocket, frames: Vec<String>, close_after: bool) {
    for frame in frames {
        if socket.send(Message::text(frame)).await.is_err() {
            return;
        }
    }
    if close_after {
        let _ = socket.send(Message::Close(None)).await;
        return;
    }
    while let Some(Ok(msg)) = socket.recv().await {
        if matches!(msg, Message::Close(_)) {
            break;
        }
    }
}

/// Waits for the next lifecycle event, failing the test after [`WAIT`].
pub async fn next_event(rx: &mut broadcast::Receiver<SocketEvent>) -> SocketEvent {
    let Ok(Ok(event)) = tokio::time::timeout(WAIT, rx.recv()).await else {
        panic!("no lifecycle event within {WAIT:?}");
    };
    event
}
