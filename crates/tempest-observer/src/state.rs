//! Shared application state for the dashboard server.

use std::sync::Arc;

use tempest_core::{ListenerStats, ObservationStore};

use crate::render::DashboardRenderer;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. The
/// store and stats are the same instances the packet listener writes.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The latest-observation store (read-only from this crate).
    pub store: Arc<ObservationStore>,
    /// Packet listener counters.
    pub stats: Arc<ListenerStats>,
    /// Template environment for `GET /`.
    pub renderer: DashboardRenderer,
}

impl AppState {
    /// Create application state over an existing store and stats.
    pub fn new(store: Arc<ObservationStore>, stats: Arc<ListenerStats>) -> Self {
        Self {
            store,
            stats,
            renderer: DashboardRenderer::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            Arc::new(ObservationStore::new()),
            Arc::new(ListenerStats::new()),
        )
    }
}
