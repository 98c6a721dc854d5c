//! Status socket payloads.
//!
//! The backend pushes JSON objects. Known shapes decode into typed
//! variants; any other well-formed JSON is kept as [`StatusEvent::Other`]
//! so the handler still sees every payload exactly once.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::dto::PublishStatus;

/// One sensor reading the backend published to MQTT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedMessage {
    /// MQTT topic (e.g. `sensor/temperature`).
    pub topic: String,
    /// Reading kind: `temperature`, `humidity`, or `pressure`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Reading value.
    pub value: f64,
    /// Record timestamp.
    pub timestamp: String,
}

/// Tagged status update (`{"type": ...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatusUpdate {
    /// One record was published.
    Progress {
        /// Records published so far.
        published: u64,
        /// Records in the replay set.
        total: u64,
        /// Completion percentage.
        progress: f64,
        /// Per-topic messages for the record, `None` on the final notice.
        #[serde(default)]
        current_message: Option<Vec<PublishedMessage>>,
    },
    /// Replay stopped before the end; it can resume from `current_index`.
    Stopped {
        /// Records published so far.
        published: u64,
        /// Records in the replay set.
        total: u64,
        /// Resume position.
        current_index: u64,
    },
    /// Replay reached the end of the data set.
    Complete {
        /// Records published.
        published: u64,
        /// Records in the replay set.
        total: u64,
    },
    /// Idle status.
    Status {
        /// Whether a replay task is running.
        is_publishing: bool,
        /// Records published so far.
        published: u64,
        /// Records in the replay set.
        total: u64,
        /// Completion percentage.
        progress: f64,
    },
}

/// A decoded status socket payload, as delivered to the message handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatusEvent {
    /// A recognized tagged update.
    Update(StatusUpdate),
    /// The untagged status snapshot sent when the socket opens.
    Snapshot(PublishStatus),
    /// Well-formed JSON of an unrecognized shape, forwarded verbatim.
    Other(Value),
}

impl StatusEvent {
    /// Decodes a text frame.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if `text` is not well-formed JSON. Any
    /// well-formed JSON decodes successfully.
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Value>(text).map(Self::from_value)
    }

    /// Classifies an already-parsed payload.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        if value.get("type").is_some() {
            if let Ok(update) = StatusUpdate::deserialize(&value) {
                return Self::Update(update);
            }
        } else if value.get("is_publishing").is_some()
            && let Ok(snapshot) = PublishStatus::deserialize(&value)
        {
            return Self::Snapshot(snapshot);
        }
        Self::Other(value)
    }

    /// Returns `true` once the replay has ended (completed or stopped).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Update(StatusUpdate::Complete { .. } | StatusUpdate::Stopped { .. })
        )
    }

    /// Returns the per-topic messages carried by a progress update.
    #[must_use]
    pub fn published_messages(&self) -> &[PublishedMessage] {
        match self {
            Self::Update(StatusUpdate::Progress {
                current_message: Some(messages),
                ..
            }) => messages,
            _ => &[],
        }
    }
}
