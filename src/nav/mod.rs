//! Navigation: the route table and the views it resolves to.
//!
//! `/` is the publisher dashboard and is built eagerly; `/subscriber` and
//! `/monitor` are deferred until first navigation.

pub mod route_table;
pub mod views;

pub use route_table::{Loading, RouteEntry, RouteTable};
pub use views::{MonitorView, PublisherView, SubscriberView, View};
