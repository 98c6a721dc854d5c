//! Backend operations: endpoint, method, and fallback message per call.

use reqwest::Method;

use crate::error::ClientError;

/// One backend call the facade knows how to make.
///
/// | Operation          | Endpoint               | Error kind   |
/// |--------------------|------------------------|--------------|
/// | `Connect`          | `POST /mqtt/connect`   | `Connection` |
/// | `BrokerDisconnect` | `POST /mqtt/disconnect`| `Request`    |
/// | `DataInfo`         | `GET /data/info`       | `Request`    |
/// | `StartPublish`     | `POST /publish/start`  | `Request`    |
/// | `StopPublish`      | `POST /publish/stop`   | `Request`    |
/// | `ResetPublish`     | `POST /publish/reset`  | `Request`    |
/// | `PublishStatus`    | `GET /publish/status`  | `Request`    |
/// | `ServiceInfo`      | `GET /`                | `Request`    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Ask the backend to connect to an MQTT broker.
    Connect,
    /// Ask the backend to drop its MQTT broker connection.
    BrokerDisconnect,
    /// Fetch the sensor data descriptor.
    DataInfo,
    /// Start (or resume) replaying sensor records.
    StartPublish,
    /// Stop the running replay.
    StopPublish,
    /// Rewind replay progress to the first record.
    ResetPublish,
    /// Fetch the current publish status.
    PublishStatus,
    /// Fetch the service banner.
    ServiceInfo,
}

impl Operation {
    /// Path relative to the backend base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Connect => "/mqtt/connect",
            Self::BrokerDisconnect => "/mqtt/disconnect",
            Self::DataInfo => "/data/info",
            Self::StartPublish => "/publish/start",
            Self::StopPublish => "/publish/stop",
            Self::ResetPublish => "/publish/reset",
            Self::PublishStatus => "/publish/status",
            Self::ServiceInfo => "/",
        }
    }

    /// HTTP method.
    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::DataInfo | Self::PublishStatus | Self::ServiceInfo => Method::GET,
            Self::Connect
            | Self::BrokerDisconnect
            | Self::StartPublish
            | Self::StopPublish
            | Self::ResetPublish => Method::POST,
        }
    }

    /// Message used when the backend supplies no `detail`.
    #[must_use]
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::Connect => "Connection failed",
            Self::BrokerDisconnect => "Disconnect failed",
            Self::DataInfo => "Failed to fetch data info",
            Self::StartPublish => "Failed to start publishing",
            Self::StopPublish => "Failed to stop publishing",
            Self::ResetPublish => "Reset failed",
            Self::PublishStatus => "Failed to fetch publish status",
            Self::ServiceInfo => "Failed to reach publisher service",
        }
    }

    /// Short name used in log fields.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::BrokerDisconnect => "broker_disconnect",
            Self::DataInfo => "data_info",
            Self::StartPublish => "start_publish",
            Self::StopPublish => "stop_publish",
            Self::ResetPublish => "reset_publish",
            Self::PublishStatus => "publish_status",
            Self::ServiceInfo => "service_info",
        }
    }

    /// Wraps `message` in the error kind this operation reports.
    #[must_use]
    pub fn error(self, message: impl Into<String>) -> ClientError {
        let message = message.into();
        match self {
            Self::Connect => ClientError::Connection { message },
            _ => ClientError::Request { message },
        }
    }
}
