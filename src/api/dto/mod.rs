//! Request and response types for the backend HTTP surface.

pub mod broker_dto;
pub mod common_dto;
pub mod data_dto;
pub mod publish_dto;

pub use broker_dto::{BrokerAck, BrokerConfig};
pub use common_dto::ErrorDetail;
pub use data_dto::{DataInfo, DateRange};
pub use publish_dto::{
    PublishConfig, PublishReset, PublishStarted, PublishStatus, PublishStopped, ServiceInfo,
};
