//! DTOs for the MQTT broker connection endpoints.

use serde::{Deserialize, Serialize};

/// Default MQTT port.
pub const DEFAULT_MQTT_PORT: u16 = 1883;

/// MQTT broker address and optional credentials.
///
/// Body of `POST /mqtt/connect`, and the optional `mqtt_config` of a
/// publish request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Broker host name or IP address.
    pub broker: String,
    /// Broker port.
    pub port: u16,
    /// Optional username; only sent together with a password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Optional password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl BrokerConfig {
    /// Creates an anonymous broker config.
    #[must_use]
    pub fn new(broker: impl Into<String>, port: u16) -> Self {
        Self {
            broker: broker.into(),
            port,
            username: None,
            password: None,
        }
    }

    /// Attaches username/password credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self::new("localhost", DEFAULT_MQTT_PORT)
    }
}

/// Acknowledgement for `POST /mqtt/connect` and `POST /mqtt/disconnect`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerAck {
    /// Status word, `"success"` on the reference backend.
    pub status: String,
    /// Human-readable description (e.g. `"Connected to host:1883"`).
    pub message: String,
}
