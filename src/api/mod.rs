//! HTTP layer: the backend surface consumed by the facade.
//!
//! [`operation::Operation`] is the endpoint table, [`transport::HttpTransport`]
//! issues the requests and normalizes failures, and [`dto`] holds the
//! request/response contracts.

pub mod dto;
pub mod operation;
pub mod transport;

pub use operation::Operation;
pub use transport::HttpTransport;
