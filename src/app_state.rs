//! Shared application state handed to every view.

use std::sync::Arc;

use crate::service::PublisherService;

/// State available to all views.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Facade for every backend call.
    pub service: Arc<PublisherService>,
}

impl AppState {
    /// Wraps an already constructed service.
    #[must_use]
    pub fn new(service: Arc<PublisherService>) -> Self {
        Self { service }
    }
}
