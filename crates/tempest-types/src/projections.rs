//! Display-ready projections of stored observations.
//!
//! A projection is derived at read time from the raw metric message:
//! units converted to imperial, values rounded for display, timestamps
//! formatted. These are the shapes served by `GET /data.json` and
//! rendered by `GET /`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Projection of an `obs_st` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StandardProjection {
    /// Serial number of the reporting device.
    pub serial_number: String,
    /// Observation time, formatted in UTC.
    pub time: String,
    /// Air temperature, degrees Fahrenheit (1 decimal).
    pub temperature: f64,
    /// Relative humidity, percent (unrounded).
    pub humidity: f64,
    /// Average wind speed, mph (1 decimal).
    pub wind_avg: f64,
    /// Wind direction, compass degrees (unscaled).
    pub wind_dir: f64,
    /// Wind gust, mph (1 decimal).
    pub wind_gust: f64,
    /// Rain over the report interval, inches (2 decimals).
    pub rain: f64,
    /// Station pressure, inches of mercury (2 decimals).
    pub pressure: f64,
}

/// Projection of a `rapid_wind` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RapidWindProjection {
    /// Serial number of the reporting device.
    pub serial_number: String,
    /// Sample time, formatted in UTC.
    pub time: String,
    /// Wind speed, mph (1 decimal).
    pub speed: f64,
    /// Wind direction, compass degrees.
    pub direction: f64,
}

/// Projection of an `evt_precip` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PrecipitationProjection {
    /// Serial number of the reporting device.
    pub serial_number: String,
    /// Rain onset time, formatted in UTC.
    pub time: String,
}

/// Error body reported in place of a projection that could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ProjectionFault {
    /// Human-readable description of the fault.
    pub error: String,
}

/// The projected state of one store slot.
///
/// Serializes untagged: `Absent` becomes JSON `null`, `Ready` the
/// projection object itself, and `Fault` an `{"error": ...}` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum Projected<T> {
    /// No message of this kind has been received yet.
    Absent,
    /// The projection of the latest message.
    Ready(T),
    /// The latest message is present but could not be projected.
    Fault(ProjectionFault),
}

impl<T> Projected<T> {
    /// Borrow the projection, if one is ready.
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Absent | Self::Fault(_) => None,
        }
    }

    /// Whether this slot has never received a message.
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// The full `/data.json` document: one entry per observation kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DashboardProjection {
    /// Latest `obs_st` projection.
    pub obs_st: Projected<StandardProjection>,
    /// Latest `rapid_wind` projection.
    pub rapid_wind: Projected<RapidWindProjection>,
    /// Latest `evt_precip` projection.
    pub evt_precip: Projected<PrecipitationProjection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_slots_serialize_as_null() {
        let dashboard = DashboardProjection {
            obs_st: Projected::Absent,
            rapid_wind: Projected::Absent,
            evt_precip: Projected::Absent,
        };
        let json = serde_json::to_value(&dashboard).unwrap_or_default();
        assert!(json["obs_st"].is_null());
        assert!(json["rapid_wind"].is_null());
        assert!(json["evt_precip"].is_null());
        assert_eq!(json.as_object().map(serde_json::Map::len), Some(3));
    }

    #[test]
    fn ready_and_fault_serialize_inline() {
        let dashboard = DashboardProjection {
            obs_st: Projected::Fault(ProjectionFault {
                error: String::from("bad timestamp"),
            }),
            rapid_wind: Projected::Ready(RapidWindProjection {
                serial_number: String::from("ST-1"),
                time: String::from("2020-05-08 02:36:54 PM UTC"),
                speed: 11.2,
                direction: 128.0,
            }),
            evt_precip: Projected::Absent,
        };
        let json = serde_json::to_value(&dashboard).unwrap_or_default();
        assert_eq!(json["obs_st"]["error"], "bad timestamp");
        assert_eq!(json["rapid_wind"]["speed"], 11.2);
        assert_eq!(json["rapid_wind"]["direction"], 128.0);
    }

    #[test]
    fn typescript_declaration_covers_document_shape() {
        let decl = DashboardProjection::decl();
        assert!(decl.contains("obs_st"));
        assert!(decl.contains("rapid_wind"));
        assert!(decl.contains("evt_precip"));
        assert!(Projected::<RapidWindProjection>::decl().contains("null"));
    }
}
