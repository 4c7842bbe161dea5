//! Listener counters shared with the HTTP boundary.
//!
//! Counters are plain atomics so the listener loop never takes a lock to
//! account for a datagram.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Running totals for the packet listener.
#[derive(Debug)]
pub struct ListenerStats {
    received: AtomicU64,
    stored: AtomicU64,
    ignored: AtomicU64,
    rejected: AtomicU64,
    started_at: DateTime<Utc>,
}

/// A copy of [`ListenerStats`] suitable for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListenerStatsSnapshot {
    /// Datagrams read off the socket.
    pub received: u64,
    /// Datagrams that replaced a store slot.
    pub stored: u64,
    /// Well-formed datagrams of a kind the dashboard does not track.
    pub ignored: u64,
    /// Datagrams that failed to decode.
    pub rejected: u64,
    /// When the counters started.
    pub started_at: DateTime<Utc>,
}

impl ListenerStats {
    /// Create zeroed counters starting now.
    pub fn new() -> Self {
        Self {
            received: AtomicU64::new(0),
            stored: AtomicU64::new(0),
            ignored: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            started_at: Utc::now(),
        }
    }

    /// Count a datagram read off the socket.
    pub fn record_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a datagram that was stored.
    pub fn record_stored(&self) {
        self.stored.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a datagram of an untracked kind.
    pub fn record_ignored(&self) {
        self.ignored.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a datagram that failed to decode.
    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Read all counters.
    pub fn snapshot(&self) -> ListenerStatsSnapshot {
        ListenerStatsSnapshot {
            received: self.received.load(Ordering::Relaxed),
            stored: self.stored.load(Ordering::Relaxed),
            ignored: self.ignored.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            started_at: self.started_at,
        }
    }
}

impl Default for ListenerStats {
    fn default() -> Self {
        Self::new()
    }
}
