//! Shared type definitions for the Tempest dashboard.
//!
//! This crate is the single source of truth for the data that flows
//! between the packet listener, the observation store, and the HTTP
//! boundary. Projection types flow downstream to `TypeScript` via `ts-rs`
//! for any browser client polling `/data.json`.
//!
//! # Modules
//!
//! - [`kinds`] -- The message-type discriminator shared by every layer
//! - [`observations`] -- Decoded hub messages with named fields (raw metric units)
//! - [`projections`] -- Display-ready, unit-converted snapshots

pub mod kinds;
pub mod observations;
pub mod projections;

// Re-export all public types at crate root for convenience.
pub use kinds::ObservationKind;
pub use observations::{
    Observation, PrecipitationEvent, RapidWind, RapidWindReading, StandardObservation,
    StandardReading, STANDARD_READING_LEN,
};
pub use projections::{
    DashboardProjection, PrecipitationProjection, Projected, ProjectionFault,
    RapidWindProjection, StandardProjection,
};
