//! Application state for the web layer.

use std::sync::Arc;

use crate::view::DestinationSource;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Where destination data comes from
    pub source: Arc<dyn DestinationSource>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(source: impl DestinationSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}
