//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedNaptanClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached NaPTAN API client
    pub naptan: Arc<CachedNaptanClient>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(naptan: CachedNaptanClient) -> Self {
        Self {
            naptan: Arc::new(naptan),
        }
    }
}
