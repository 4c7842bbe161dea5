//! Axum router construction for the dashboard server.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the dashboard server.
///
/// The router includes:
/// - `GET /` -- HTML dashboard
/// - `GET /data.json` -- latest projections as JSON
/// - `GET /api/status` -- listener counters
///
/// CORS allows any origin with `GET` so a dashboard hosted elsewhere on
/// the LAN can poll `/data.json`.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/data.json", get(handlers::data_json))
        .route("/api/status", get(handlers::status))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
