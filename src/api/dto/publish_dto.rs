//! DTOs for the publish control endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::broker_dto::BrokerConfig;

/// Default replay interval in seconds.
pub const DEFAULT_INTERVAL_SECS: f64 = 1.0;

/// Body of `POST /publish/start`.
///
/// Unset optional fields are omitted so the backend applies its own
/// defaults. The client does not validate the config; the backend decides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishConfig {
    /// First day to replay (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Last day to replay (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Seconds between records.
    #[serde(default = "default_interval")]
    pub interval: f64,
    /// Sensor identifier attached by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_id: Option<String>,
    /// Sensor location label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Free-form extra annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
    /// Broker override for this run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_config: Option<BrokerConfig>,
}

fn default_interval() -> f64 {
    DEFAULT_INTERVAL_SECS
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            interval: DEFAULT_INTERVAL_SECS,
            sensor_id: None,
            location: None,
            extra: None,
            mqtt_config: None,
        }
    }
}

impl PublishConfig {
    /// Restricts the replay to `[start, end]` (either bound optional).
    #[must_use]
    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Sets the replay interval in seconds.
    #[must_use]
    pub fn with_interval(mut self, interval: f64) -> Self {
        self.interval = interval;
        self
    }
}

/// Acknowledgement for `POST /publish/start`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishStarted {
    /// Backend message (fresh start or resume position).
    pub message: String,
    /// Records in the replay set.
    pub total_records: u64,
    /// Index the replay starts from.
    pub start_index: u64,
    /// Records left to publish.
    pub remaining: u64,
}

/// Acknowledgement for `POST /publish/stop`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishStopped {
    /// Backend message.
    pub message: String,
    /// Index the replay will resume from.
    pub current_index: u64,
}

/// Acknowledgement for `POST /publish/reset`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishReset {
    /// Backend message.
    pub message: String,
    /// Always `0` after a reset.
    pub current_index: u64,
}

/// Snapshot of the backend's replay state (`GET /publish/status`).
///
/// The status socket also sends one of these, untagged, right after it
/// opens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishStatus {
    /// Whether a replay task is running.
    pub is_publishing: bool,
    /// Records in the replay set.
    pub total_records: u64,
    /// Records published so far.
    pub published_count: u64,
    /// Topic publishes the broker rejected.
    pub skipped_count: u64,
    /// Timestamp of the record last published.
    pub current_timestamp: Option<String>,
    /// Completion percentage, `0.0..=100.0`.
    pub progress: f64,
}

/// Service banner (`GET /`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceInfo {
    /// Service name.
    pub service: String,
    /// Backend version.
    pub version: String,
    /// `"running"` when healthy.
    pub status: String,
}
