//! Application state shared by all request handlers.

use std::{sync::Arc, time::Duration};

use productstore_core::storage::ProductRepository;

use crate::controller::ProductController;
use crate::storage::InMemoryRepository;

/// Shared application state.
///
/// Cloned for each request handler. The repository behind the controller is
/// the single long-lived store handle; it is safe for concurrent use, so no
/// locking happens here.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductController,
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates state around the given repository.
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self {
            products: ProductController::new(repo),
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Sets the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for AppState {
    /// State backed by an empty in-memory repository.
    fn default() -> Self {
        Self::new(Arc::new(InMemoryRepository::new()))
    }
}
