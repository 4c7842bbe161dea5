//! Read-side projection of stored observations.
//!
//! Projection is a pure function of a store slot: absent slots project to
//! [`Projected::Absent`], present ones are converted through
//! [`crate::units`], rounded for display, and stamped with a formatted
//! UTC time. Both the JSON endpoint and the HTML page render from these
//! projections, so the two never disagree.
//!
//! Wind direction is reported in plain compass degrees on every path.

use chrono::DateTime;
use tempest_types::{
    DashboardProjection, ObservationKind, PrecipitationEvent, PrecipitationProjection, Projected,
    ProjectionFault, RapidWind, RapidWindProjection, StandardObservation, StandardProjection,
};
use tracing::error;

use crate::store::{ObservationSnapshot, StoredObservation};
use crate::units::{celsius_to_fahrenheit, mbar_to_inhg, mm_to_inches, mps_to_mph};

/// `strftime` pattern for every displayed timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %I:%M:%S %p UTC";

/// Errors raised while projecting a stored message.
#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    /// A stored message holds a value that cannot be displayed.
    ///
    /// The listener should have rejected it; this is a server-side fault
    /// confined to the one slot.
    #[error("malformed stored {kind} observation: {reason}")]
    MalformedStoredObservation {
        /// The slot that failed.
        kind: ObservationKind,
        /// What was wrong with it.
        reason: String,
    },
}

/// Format epoch seconds as a UTC timestamp string.
///
/// Returns `None` if `epoch_secs` is outside the representable range.
pub fn format_timestamp(epoch_secs: i64) -> Option<String> {
    DateTime::from_timestamp(epoch_secs, 0).map(|t| t.format(TIMESTAMP_FORMAT).to_string())
}

/// Round `value` to `places` decimal places (half away from zero).
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

fn timestamp_for(kind: ObservationKind, epoch_secs: i64) -> Result<String, ProjectionError> {
    format_timestamp(epoch_secs).ok_or_else(|| ProjectionError::MalformedStoredObservation {
        kind,
        reason: format!("timestamp {epoch_secs} is out of range"),
    })
}

/// Project an `obs_st` message.
pub fn project_standard(obs: &StandardObservation) -> Result<StandardProjection, ProjectionError> {
    let reading = &obs.reading;
    Ok(StandardProjection {
        serial_number: obs.serial_number.clone(),
        time: timestamp_for(ObservationKind::StandardObservation, reading.timestamp)?,
        temperature: round_to(celsius_to_fahrenheit(reading.air_temperature), 1),
        humidity: reading.relative_humidity,
        wind_avg: round_to(mps_to_mph(reading.wind_avg), 1),
        wind_dir: reading.wind_direction,
        wind_gust: round_to(mps_to_mph(reading.wind_gust), 1),
        rain: round_to(mm_to_inches(reading.rain_accumulation), 2),
        pressure: round_to(mbar_to_inhg(reading.station_pressure), 2),
    })
}

/// Project a `rapid_wind` message.
pub fn project_rapid_wind(obs: &RapidWind) -> Result<RapidWindProjection, ProjectionError> {
    let reading = &obs.reading;
    Ok(RapidWindProjection {
        serial_number: obs.serial_number.clone(),
        time: timestamp_for(ObservationKind::RapidWind, reading.timestamp)?,
        speed: round_to(mps_to_mph(reading.wind_speed), 1),
        direction: reading.wind_direction,
    })
}

/// Project an `evt_precip` message.
pub fn project_precipitation(
    evt: &PrecipitationEvent,
) -> Result<PrecipitationProjection, ProjectionError> {
    Ok(PrecipitationProjection {
        serial_number: evt.serial_number.clone(),
        time: timestamp_for(ObservationKind::PrecipitationEvent, evt.started_at)?,
    })
}

/// Project one slot, confining any failure to that slot.
fn project_slot<T, P>(
    slot: Option<&StoredObservation<T>>,
    project: impl FnOnce(&T) -> Result<P, ProjectionError>,
) -> Projected<P> {
    let Some(stored) = slot else {
        return Projected::Absent;
    };

    match project(stored.observation.as_ref()) {
        Ok(projection) => Projected::Ready(projection),
        Err(e) => {
            error!(error = %e, "failed to project stored observation");
            Projected::Fault(ProjectionFault {
                error: e.to_string(),
            })
        }
    }
}

/// Project every slot of a snapshot.
pub fn project_snapshot(snapshot: &ObservationSnapshot) -> DashboardProjection {
    DashboardProjection {
        obs_st: project_slot(snapshot.standard.as_ref(), project_standard),
        rapid_wind: project_slot(snapshot.rapid_wind.as_ref(), project_rapid_wind),
        evt_precip: project_slot(snapshot.precipitation.as_ref(), project_precipitation),
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use tempest_types::{RapidWindReading, StandardReading};

    use super::*;

    fn standard_reading(temperature: f64) -> StandardReading {
        StandardReading {
            timestamp: 1_588_948_614,
            wind_lull: Some(0.18),
            wind_avg: 0.22,
            wind_direction: 144.0,
            wind_gust: 0.27,
            wind_sample_interval: Some(6.0),
            station_pressure: 1017.57,
            air_temperature: temperature,
            relative_humidity: 50.26,
            illuminance: Some(328.0),
            uv_index: Some(0.03),
            solar_radiation: Some(3.0),
            rain_accumulation: 0.0,
            precipitation_type: Some(0.0),
            lightning_avg_distance: Some(0.0),
            lightning_count: Some(0.0),
            battery_voltage: Some(2.41),
            report_interval: Some(1.0),
        }
    }

    fn standard(temperature: f64) -> StandardObservation {
        StandardObservation {
            serial_number: String::from("ST-00000512"),
            hub_serial_number: None,
            firmware_revision: None,
            reading: standard_reading(temperature),
        }
    }

    fn stored<T>(value: T) -> StoredObservation<T> {
        StoredObservation::new(Arc::new(value), Utc::now())
    }

    #[test]
    fn round_to_places() {
        assert_eq!(round_to(11.1847, 1), 11.2);
        assert_eq!(round_to(30.048_842_1, 2), 30.05);
        assert_eq!(round_to(68.0, 1), 68.0);
        assert_eq!(round_to(-0.25, 1), -0.3);
    }

    #[test]
    fn timestamps_are_utc_and_labelled() {
        assert_eq!(
            format_timestamp(1_588_948_614).as_deref(),
            Some("2020-05-08 02:36:54 PM UTC")
        );
        assert_eq!(
            format_timestamp(0).as_deref(),
            Some("1970-01-01 12:00:00 AM UTC")
        );
        assert!(format_timestamp(i64::MAX).is_none());
    }

    #[test]
    fn standard_projection_converts_and_rounds() {
        let projection = project_standard(&standard(20.0)).ok();
        let expected = StandardProjection {
            serial_number: String::from("ST-00000512"),
            time: String::from("2020-05-08 02:36:54 PM UTC"),
            temperature: 68.0,
            humidity: 50.26,
            wind_avg: 0.5,
            wind_dir: 144.0,
            wind_gust: 0.6,
            rain: 0.0,
            pressure: 30.05,
        };
        assert_eq!(projection, Some(expected));
    }

    #[test]
    fn standard_projection_rounds_temperature_to_one_place() {
        let projection = project_standard(&standard(22.37)).ok();
        assert_eq!(projection.map(|p| p.temperature), Some(72.3));
    }

    #[test]
    fn rapid_wind_projection() {
        let wind = RapidWind {
            serial_number: String::from("ST-00000512"),
            hub_serial_number: None,
            reading: RapidWindReading {
                timestamp: 1_588_948_614,
                wind_speed: 5.0,
                wind_direction: 270.0,
            },
        };
        let projection = project_rapid_wind(&wind).ok();
        assert_eq!(projection.as_ref().map(|p| p.speed), Some(11.2));
        assert_eq!(projection.as_ref().map(|p| p.direction), Some(270.0));
    }

    #[test]
    fn precipitation_projection() {
        let evt = PrecipitationEvent {
            serial_number: String::from("ST-00000512"),
            hub_serial_number: None,
            started_at: 1_493_322_445,
        };
        let projection = project_precipitation(&evt).ok();
        assert_eq!(
            projection.map(|p| p.time),
            Some(String::from("2017-04-27 07:47:25 PM UTC"))
        );
    }

    #[test]
    fn empty_snapshot_projects_to_absent() {
        let dashboard = project_snapshot(&ObservationSnapshot::default());
        assert!(dashboard.obs_st.is_absent());
        assert!(dashboard.rapid_wind.is_absent());
        assert!(dashboard.evt_precip.is_absent());
    }

    #[test]
    fn malformed_slot_faults_alone() {
        let mut broken = standard(20.0);
        broken.reading.timestamp = i64::MAX;
        let snapshot = ObservationSnapshot {
            standard: Some(stored(broken)),
            rapid_wind: None,
            precipitation: Some(stored(PrecipitationEvent {
                serial_number: String::from("ST-00000512"),
                hub_serial_number: None,
                started_at: 1_493_322_445,
            })),
        };

        let dashboard = project_snapshot(&snapshot);
        assert!(matches!(dashboard.obs_st, Projected::Fault(_)));
        assert!(dashboard.rapid_wind.is_absent());
        assert!(dashboard.evt_precip.ready().is_some());
    }
}
