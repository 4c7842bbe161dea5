//! Decoded hub messages.
//!
//! The hub sends each reading as a positional JSON array. The listener
//! decodes those arrays once, at the boundary, into the named structs
//! below so nothing downstream ever indexes into a tuple. All values are
//! in the hub's native metric units.

use serde::{Deserialize, Serialize};

use crate::kinds::ObservationKind;

/// Number of positional elements in an `obs_st` reading tuple.
pub const STANDARD_READING_LEN: usize = 18;

// ---------------------------------------------------------------------------
// obs_st
// ---------------------------------------------------------------------------

/// A full station observation (`obs_st`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardObservation {
    /// Serial number of the reporting device (e.g. `ST-00000512`).
    pub serial_number: String,
    /// Serial number of the hub that relayed the message, if present.
    pub hub_serial_number: Option<String>,
    /// Device firmware revision, if present.
    pub firmware_revision: Option<u32>,
    /// The reading tuple.
    pub reading: StandardReading,
}

/// The reading tuple of an `obs_st` message.
///
/// Fields the dashboard renders are required; the remaining sensors are
/// allowed to report `null` (the hub does so when a sensor fails).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardReading {
    /// Position 0: epoch seconds (UTC).
    pub timestamp: i64,
    /// Position 1: wind lull, m/s.
    pub wind_lull: Option<f64>,
    /// Position 2: wind average, m/s.
    pub wind_avg: f64,
    /// Position 3: wind direction, degrees.
    pub wind_direction: f64,
    /// Position 4: wind gust, m/s.
    pub wind_gust: f64,
    /// Position 5: wind sample interval, seconds.
    pub wind_sample_interval: Option<f64>,
    /// Position 6: station pressure, millibar.
    pub station_pressure: f64,
    /// Position 7: air temperature, degrees Celsius.
    pub air_temperature: f64,
    /// Position 8: relative humidity, percent.
    pub relative_humidity: f64,
    /// Position 9: illuminance, lux.
    pub illuminance: Option<f64>,
    /// Position 10: UV index.
    pub uv_index: Option<f64>,
    /// Position 11: solar radiation, W/m^2.
    pub solar_radiation: Option<f64>,
    /// Position 12: rain accumulated over the report interval, millimeters.
    pub rain_accumulation: f64,
    /// Position 13: precipitation type (0 none, 1 rain, 2 hail, 3 mixed).
    pub precipitation_type: Option<f64>,
    /// Position 14: lightning strike average distance, km.
    pub lightning_avg_distance: Option<f64>,
    /// Position 15: lightning strike count.
    pub lightning_count: Option<f64>,
    /// Position 16: battery voltage.
    pub battery_voltage: Option<f64>,
    /// Position 17: report interval, minutes.
    pub report_interval: Option<f64>,
}

// ---------------------------------------------------------------------------
// rapid_wind
// ---------------------------------------------------------------------------

/// A rapid wind sample (`rapid_wind`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RapidWind {
    /// Serial number of the reporting device.
    pub serial_number: String,
    /// Serial number of the relaying hub, if present.
    pub hub_serial_number: Option<String>,
    /// The reading tuple.
    pub reading: RapidWindReading,
}

/// The `(timestamp, speed, direction)` tuple of a `rapid_wind` message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RapidWindReading {
    /// Epoch seconds (UTC).
    pub timestamp: i64,
    /// Wind speed, m/s.
    pub wind_speed: f64,
    /// Wind direction, degrees.
    pub wind_direction: f64,
}

// ---------------------------------------------------------------------------
// evt_precip
// ---------------------------------------------------------------------------

/// A rain-onset event (`evt_precip`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecipitationEvent {
    /// Serial number of the reporting device.
    pub serial_number: String,
    /// Serial number of the relaying hub, if present.
    pub hub_serial_number: Option<String>,
    /// Epoch seconds (UTC) at which rain started.
    pub started_at: i64,
}

// ---------------------------------------------------------------------------
// Tagged union
// ---------------------------------------------------------------------------

/// A decoded message of any recognized kind.
///
/// The `obs_st` payload is boxed; it is several times the size of the
/// other two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Observation {
    /// An `obs_st` message.
    Standard(Box<StandardObservation>),
    /// A `rapid_wind` message.
    RapidWind(RapidWind),
    /// An `evt_precip` message.
    Precipitation(PrecipitationEvent),
}

impl Observation {
    /// The kind this message belongs to.
    pub const fn kind(&self) -> ObservationKind {
        match self {
            Self::Standard(_) => ObservationKind::StandardObservation,
            Self::RapidWind(_) => ObservationKind::RapidWind,
            Self::Precipitation(_) => ObservationKind::PrecipitationEvent,
        }
    }

    /// Serial number of the device that produced this message.
    pub fn serial_number(&self) -> &str {
        match self {
            Self::Standard(obs) => &obs.serial_number,
            Self::RapidWind(obs) => &obs.serial_number,
            Self::Precipitation(evt) => &evt.serial_number,
        }
    }
}

impl From<StandardObservation> for Observation {
    fn from(obs: StandardObservation) -> Self {
        Self::Standard(Box::new(obs))
    }
}

impl From<RapidWind> for Observation {
    fn from(obs: RapidWind) -> Self {
        Self::RapidWind(obs)
    }
}

impl From<PrecipitationEvent> for Observation {
    fn from(evt: PrecipitationEvent) -> Self {
        Self::Precipitation(evt)
    }
}
