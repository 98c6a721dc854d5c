//! Service layer: the broker service facade.
//!
//! [`PublisherService`] turns each operation into one backend call and owns
//! the connected flag and the status socket handle.

pub mod publisher_service;

pub use publisher_service::PublisherService;
