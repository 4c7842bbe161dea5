//! HTTP endpoint handlers for the dashboard server.
//!
//! All handlers read a snapshot of the shared store via [`AppState`] and
//! project it on the spot.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | HTML dashboard |
//! | `GET` | `/data.json` | Latest projection of each kind |
//! | `GET` | `/api/status` | Listener counters and slot receive times |

use std::sync::Arc;

use axum::extract::State;
use axum::http::Uri;
use axum::response::{Html, IntoResponse};
use axum::Json;
use tempest_core::project_snapshot;
use tempest_types::ObservationKind;

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- HTML dashboard
// ---------------------------------------------------------------------------

/// Serve the rendered dashboard page.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ObserverError> {
    let snapshot = state.store.snapshot().await;
    let page = state.renderer.render(&project_snapshot(&snapshot))?;
    Ok(Html(page))
}

// ---------------------------------------------------------------------------
// GET /data.json -- latest projections
// ---------------------------------------------------------------------------

/// Return the latest projection of each observation kind.
///
/// Always has the keys `obs_st`, `rapid_wind`, and `evt_precip`; a kind
/// with no data is `null`.
pub async fn data_json(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.store.snapshot().await;
    Json(project_snapshot(&snapshot))
}

// ---------------------------------------------------------------------------
// GET /api/status -- listener health
// ---------------------------------------------------------------------------

/// Return listener counters and when each slot was last written.
pub async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.store.snapshot().await;
    let mut last_received = serde_json::Map::new();
    for kind in ObservationKind::ALL {
        last_received.insert(
            kind.as_str().to_owned(),
            serde_json::json!(snapshot.received_at(kind)),
        );
    }

    Json(serde_json::json!({
        "listener": state.stats.snapshot(),
        "last_received": last_received,
    }))
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// JSON 404 for unknown routes.
pub async fn not_found(uri: Uri) -> ObserverError {
    ObserverError::NotFound(uri.path().to_owned())
}
