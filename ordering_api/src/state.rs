//! API server state.

use std::sync::Arc;

use ordering_store_interface::DataStore;

/// Shared state for the API server.
#[derive(Clone)]
pub struct ApiState {
    /// Data store holding dishes and orders for the process lifetime.
    pub store: Arc<dyn DataStore>,
}

impl ApiState {
    /// Create new API state over a store.
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}
