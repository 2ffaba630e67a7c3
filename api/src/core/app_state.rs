use std::sync::Arc;

use faq_store::FaqStore;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Sync and retrieval over the configured FAQ collection.
    pub store: Arc<FaqStore>,
}

impl AppState {
    pub fn new(store: Arc<FaqStore>) -> Self {
        Self { store }
    }
}
