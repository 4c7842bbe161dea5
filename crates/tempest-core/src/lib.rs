//! Core read/write logic for the Tempest dashboard.
//!
//! # Modules
//!
//! - [`units`] -- Metric to imperial conversions (pure, stateless)
//! - [`store`] -- The shared latest-observation store
//! - [`projector`] -- Read-side projection of stored messages for display
//! - [`stats`] -- Lock-free listener counters
//! - [`config`] -- Typed station configuration loaded from YAML
//!
//! # Architecture
//!
//! ```text
//! listener --update--> ObservationStore --snapshot--> projector --> HTTP
//! ```
//!
//! The store is an explicitly owned object shared by [`std::sync::Arc`]
//! between the listener task and the HTTP handlers. Conversions happen
//! only on the read side; the store never holds imperial values.

pub mod config;
pub mod projector;
pub mod stats;
pub mod store;
pub mod units;

pub use config::{ConfigError, LogFormat, StationConfig};
pub use projector::{format_timestamp, project_snapshot, ProjectionError};
pub use stats::{ListenerStats, ListenerStatsSnapshot};
pub use store::{ObservationSnapshot, ObservationStore, StoredObservation};
