//! The shared latest-observation store.
//!
//! [`ObservationStore`] holds at most one message per
//! [`ObservationKind`]. Each slot holds an immutable [`Arc`]; a write
//! builds the new value outside the lock and then swaps the pointer under
//! a short write lock, and a read clones the three pointers under a read
//! lock. A reader therefore sees either the old message or the new one in
//! full, never a mixture.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tempest_types::{
    Observation, ObservationKind, PrecipitationEvent, RapidWind, StandardObservation,
};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// A message held in a store slot, with the instant it arrived.
#[derive(Debug)]
pub struct StoredObservation<T> {
    /// The decoded message, shared immutably with every reader.
    pub observation: Arc<T>,
    /// Wall-clock time the listener stored the message.
    pub received_at: DateTime<Utc>,
}

impl<T> StoredObservation<T> {
    /// Wrap a message received at `received_at`.
    pub const fn new(observation: Arc<T>, received_at: DateTime<Utc>) -> Self {
        Self {
            observation,
            received_at,
        }
    }
}

// Manual impl: cloning only bumps the refcount, so `T: Clone` is not needed.
impl<T> Clone for StoredObservation<T> {
    fn clone(&self) -> Self {
        Self {
            observation: Arc::clone(&self.observation),
            received_at: self.received_at,
        }
    }
}

/// A point-in-time copy of all three store slots.
///
/// `None` means no message of that kind has been received since startup.
#[derive(Debug, Clone, Default)]
pub struct ObservationSnapshot {
    /// Latest `obs_st` message.
    pub standard: Option<StoredObservation<StandardObservation>>,
    /// Latest `rapid_wind` message.
    pub rapid_wind: Option<StoredObservation<RapidWind>>,
    /// Latest `evt_precip` message.
    pub precipitation: Option<StoredObservation<PrecipitationEvent>>,
}

impl ObservationSnapshot {
    /// When the slot for `kind` was last written, if ever.
    pub fn received_at(&self, kind: ObservationKind) -> Option<DateTime<Utc>> {
        match kind {
            ObservationKind::StandardObservation => self.standard.as_ref().map(|s| s.received_at),
            ObservationKind::RapidWind => self.rapid_wind.as_ref().map(|s| s.received_at),
            ObservationKind::PrecipitationEvent => {
                self.precipitation.as_ref().map(|s| s.received_at)
            }
        }
    }

    /// Whether no slot has been written yet.
    pub const fn is_empty(&self) -> bool {
        self.standard.is_none() && self.rapid_wind.is_none() && self.precipitation.is_none()
    }
}

/// Shared store of the most recent message of each kind.
///
/// Constructed once at startup, wrapped in [`Arc`], and handed to both the
/// packet listener (the only writer) and the HTTP boundary (readers).
#[derive(Debug, Default)]
pub struct ObservationStore {
    slots: RwLock<ObservationSnapshot>,
}

impl ObservationStore {
    /// Create a store with every slot absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the slot for `kind` with `observation`.
    ///
    /// Returns `true` if a slot was replaced. A message whose own kind
    /// differs from `kind` is ignored and `false` is returned; the store
    /// never files a message under the wrong slot.
    pub async fn update(&self, kind: ObservationKind, observation: Observation) -> bool {
        let actual = observation.kind();
        if actual != kind {
            warn!(
                expected = %kind,
                actual = %actual,
                "observation filed under the wrong kind, update ignored"
            );
            return false;
        }

        let received_at = Utc::now();
        match observation {
            Observation::Standard(obs) => {
                let stored = StoredObservation::new(Arc::from(obs), received_at);
                self.slots.write().await.standard = Some(stored);
            }
            Observation::RapidWind(obs) => {
                let stored = StoredObservation::new(Arc::new(obs), received_at);
                self.slots.write().await.rapid_wind = Some(stored);
            }
            Observation::Precipitation(evt) => {
                let stored = StoredObservation::new(Arc::new(evt), received_at);
                self.slots.write().await.precipitation = Some(stored);
            }
        }

        debug!(kind = %kind, "store slot replaced");
        true
    }

    /// Store `observation` under its own kind.
    pub async fn record(&self, observation: Observation) -> bool {
        self.update(observation.kind(), observation).await
    }

    /// Take a consistent copy of all three slots.
    ///
    /// The read lock is held only while three [`Arc`]s are cloned.
    pub async fn snapshot(&self) -> ObservationSnapshot {
        self.slots.read().await.clone()
    }
}
