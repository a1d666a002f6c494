//! Application state shared across all route handlers.
//!
//! Passed to handlers via axum's State extractor. Nothing in it changes after
//! startup; the relay is stateless across requests.

use std::sync::Arc;
use std::time::Instant;

use shree_core::ShreeConfig;

use crate::relay::Relay;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<ShreeConfig>,
    /// Relay to the upstream generation API.
    pub relay: Arc<Relay>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: ShreeConfig, relay: Relay) -> Self {
        Self {
            config: Arc::new(config),
            relay: Arc::new(relay),
            start_time: Instant::now(),
        }
    }
}
