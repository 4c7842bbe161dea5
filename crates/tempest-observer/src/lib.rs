//! Dashboard HTTP server for the Tempest weather station.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`GET /data.json`** -- the latest projection of each observation
//!   kind, `null` where nothing has arrived yet
//! - **`GET /`** -- the same projections rendered as an auto-refreshing
//!   HTML page
//! - **`GET /api/status`** -- listener counters and per-slot receive times
//!
//! # Architecture
//!
//! Every handler takes a snapshot of the shared
//! [`ObservationStore`](tempest_core::ObservationStore) and projects it at
//! request time. Handlers never write to the store and hold its read
//! lock only for the snapshot copy, so they never stall the listener.

pub mod error;
pub mod handlers;
pub mod render;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use router::build_router;
pub use render::DashboardRenderer;
pub use server::{start_server, ServerError};
pub use state::AppState;
