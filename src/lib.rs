//! # publisher-client
//!
//! HTTP and WebSocket client for the sensor publisher backend.
//!
//! The backend owns the MQTT broker connection and replays recorded
//! temperature, humidity, and pressure samples onto `sensor/*` topics. This
//! crate drives it: broker connect, data introspection, publish
//! start/stop/reset, and a push socket for live status.
//!
//! ## Architecture
//!
//! ```text
//! CLI (main.rs)
//!     │
//!     ├── RouteTable → Views (nav/)
//!     │
//!     ├── PublisherService facade (service/)
//!     │       ├── HttpTransport + Operation table (api/)
//!     │       └── status socket task (ws/) ──► EventBus (domain/)
//!     │
//!     └── publisher backend (HTTP + /ws/status)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod nav;
pub mod service;
pub mod ws;

pub use config::ClientConfig;
pub use error::{ClientError, ConfigError};
pub use service::PublisherService;
