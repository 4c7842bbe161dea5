//! The message-type discriminator carried in the `type` field of every
//! hub datagram.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One of the three observation kinds the dashboard understands.
///
/// Any other discriminator value the hub emits (`hub_status`,
/// `device_status`, `evt_strike`, ...) never becomes an
/// [`ObservationKind`], so unrecognized kinds are filtered by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ObservationKind {
    /// Periodic full station observation (`obs_st`).
    #[serde(rename = "obs_st")]
    StandardObservation,
    /// Three-second wind sample (`rapid_wind`).
    #[serde(rename = "rapid_wind")]
    RapidWind,
    /// Rain-onset event (`evt_precip`).
    #[serde(rename = "evt_precip")]
    PrecipitationEvent,
}

impl ObservationKind {
    /// All recognized kinds, in dashboard display order.
    pub const ALL: [Self; 3] = [
        Self::StandardObservation,
        Self::RapidWind,
        Self::PrecipitationEvent,
    ];

    /// The wire discriminator for this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StandardObservation => "obs_st",
            Self::RapidWind => "rapid_wind",
            Self::PrecipitationEvent => "evt_precip",
        }
    }

    /// Map a wire discriminator to a recognized kind.
    ///
    /// Returns `None` for any discriminator the dashboard does not track.
    pub fn from_discriminator(discriminator: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == discriminator)
    }
}

impl fmt::Display for ObservationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
