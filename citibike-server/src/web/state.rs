//! Application state for the web layer.

use std::sync::Arc;

use crate::feed::FeedClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Client for the station feeds
    pub feeds: Arc<FeedClient>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(feeds: FeedClient) -> Self {
        Self {
            feeds: Arc::new(feeds),
        }
    }
}
