//! Application state
//!
//! Handler invocations share no mutable state. The only process-wide value
//! is the upstream client, built once in `main` and handed to every
//! handler through axum's `State` extractor as an immutable `Arc`.

use crate::upstream::UpstreamClient;

/// Shared application state
pub struct AppState {
    /// Client for the completion service
    pub upstream: UpstreamClient,
}

impl AppState {
    /// Build state around an already-configured upstream client
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }
}
