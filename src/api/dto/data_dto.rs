//! DTOs for the sensor data descriptor (`GET /data/info`).

use serde::{Deserialize, Serialize};

/// Counts and time span of the sensor records the backend can replay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataInfo {
    /// Non-empty temperature samples.
    pub temperature_count: u64,
    /// Non-empty humidity samples.
    pub humidity_count: u64,
    /// Non-empty pressure samples.
    pub pressure_count: u64,
    /// Timestamps present in all three series.
    pub total_records: u64,
    /// First and last temperature timestamp.
    pub date_range: DateRange,
}

/// Inclusive timestamp span, `None` when the series is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    /// Earliest timestamp (`YYYY-MM-DDTHH:MM:SS`).
    pub start: Option<String>,
    /// Latest timestamp.
    pub end: Option<String>,
}
