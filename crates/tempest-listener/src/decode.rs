//! Datagram decoding.
//!
//! The hub's wire format carries each reading as a positional JSON array
//! (`"obs": [[epoch, lull, avg, ...]]`). [`decode_datagram`] validates the
//! envelope, picks the decoder for the `type` discriminator, and maps the
//! array positions onto the named fields of [`tempest_types`]. A reading
//! that is too short, or that has `null` where the dashboard needs a
//! value, is rejected here rather than surfacing later as a bad index.

use serde::Deserialize;
use serde_json::Value;
use tempest_types::{
    Observation, ObservationKind, PrecipitationEvent, RapidWind, RapidWindReading,
    StandardObservation, StandardReading, STANDARD_READING_LEN,
};

/// Latest epoch second accepted in a reading (9999-12-31T23:59:59Z).
pub const MAX_EPOCH_SECS: f64 = 253_402_300_799.0;

/// Number of positional elements in a `rapid_wind` reading.
const RAPID_WIND_READING_LEN: usize = 3;

/// Number of positional elements required in an `evt_precip` reading.
const PRECIP_READING_LEN: usize = 1;

/// Result of decoding a well-formed datagram.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// One of the three tracked message kinds.
    Recognized(Observation),
    /// A valid message of a kind the dashboard does not track; carries the
    /// discriminator for logging.
    Unrecognized(String),
}

/// Why a datagram was discarded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The payload is not UTF-8.
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The payload is not JSON.
    #[error("payload is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// The payload is JSON but not an object.
    #[error("payload is not a JSON object")]
    NotAnObject,

    /// The object has no string `type` field.
    #[error("payload has no string \"type\" discriminator")]
    MissingDiscriminator,

    /// The object does not match the layout for its kind.
    #[error("{kind} message has an unexpected layout: {source}")]
    Shape {
        /// The declared kind.
        kind: ObservationKind,
        /// The underlying deserialization error.
        source: serde_json::Error,
    },

    /// The reading list is empty.
    #[error("{kind} message carries no reading")]
    EmptyReadings {
        /// The declared kind.
        kind: ObservationKind,
    },

    /// The reading tuple is shorter than the kind requires.
    #[error("{kind} reading has {actual} elements, expected at least {expected}")]
    TooFewElements {
        /// The declared kind.
        kind: ObservationKind,
        /// Minimum number of elements.
        expected: usize,
        /// Number of elements received.
        actual: usize,
    },

    /// A required reading element is `null`.
    #[error("{kind} reading has no value for {field}")]
    MissingField {
        /// The declared kind.
        kind: ObservationKind,
        /// Name of the missing field.
        field: &'static str,
    },

    /// A timestamp element is not a whole, in-range epoch second.
    #[error("{kind} reading has invalid timestamp {value}")]
    InvalidTimestamp {
        /// The declared kind.
        kind: ObservationKind,
        /// The raw value received.
        value: f64,
    },
}

// ---------------------------------------------------------------------------
// Wire layouts
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct WireStandard {
    serial_number: String,
    #[serde(default)]
    hub_sn: Option<String>,
    #[serde(default)]
    firmware_revision: Option<Value>,
    obs: Vec<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct WireRapidWind {
    serial_number: String,
    #[serde(default)]
    hub_sn: Option<String>,
    ob: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct WirePrecipitation {
    serial_number: String,
    #[serde(default)]
    hub_sn: Option<String>,
    evt: Vec<Option<f64>>,
}

/// A positional reading tuple checked for minimum length.
struct Tuple<'a> {
    kind: ObservationKind,
    values: &'a [Option<f64>],
}

impl<'a> Tuple<'a> {
    fn new(
        kind: ObservationKind,
        values: &'a [Option<f64>],
        expected: usize,
    ) -> Result<Self, DecodeError> {
        if values.len() < expected {
            return Err(DecodeError::TooFewElements {
                kind,
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { kind, values })
    }

    fn optional(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    fn required(&self, index: usize, field: &'static str) -> Result<f64, DecodeError> {
        self.optional(index).ok_or(DecodeError::MissingField {
            kind: self.kind,
            field,
        })
    }

    fn timestamp(&self, index: usize, field: &'static str) -> Result<i64, DecodeError> {
        let value = self.required(index, field)?;
        if !value.is_finite() || value.fract() != 0.0 || !(0.0..=MAX_EPOCH_SECS).contains(&value) {
            return Err(DecodeError::InvalidTimestamp {
                kind: self.kind,
                value,
            });
        }
        // Whole and within 0..=MAX_EPOCH_SECS, so the cast is exact.
        #[allow(clippy::cast_possible_truncation)]
        let secs = value as i64;
        Ok(secs)
    }
}

// ---------------------------------------------------------------------------
// Decoders
// ---------------------------------------------------------------------------

/// Decode one datagram payload.
///
/// # Errors
///
/// Returns a [`DecodeError`] describing the first problem found. A
/// well-formed message of an untracked kind is not an error; it decodes
/// to [`Decoded::Unrecognized`].
pub fn decode_datagram(payload: &[u8]) -> Result<Decoded, DecodeError> {
    let text = std::str::from_utf8(payload)?;
    let value: Value = serde_json::from_str(text).map_err(DecodeError::Json)?;
    if !value.is_object() {
        return Err(DecodeError::NotAnObject);
    }

    let discriminator = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingDiscriminator)?;

    let Some(kind) = ObservationKind::from_discriminator(discriminator) else {
        return Ok(Decoded::Unrecognized(discriminator.to_owned()));
    };

    let observation = match kind {
        ObservationKind::StandardObservation => decode_standard(value)?.into(),
        ObservationKind::RapidWind => decode_rapid_wind(value)?.into(),
        ObservationKind::PrecipitationEvent => decode_precipitation(value)?.into(),
    };
    Ok(Decoded::Recognized(observation))
}

fn shape<T: for<'de> Deserialize<'de>>(
    kind: ObservationKind,
    value: Value,
) -> Result<T, DecodeError> {
    serde_json::from_value(value).map_err(|source| DecodeError::Shape { kind, source })
}

/// Decode an `obs_st` object. Only the first reading is used; the hub
/// sends exactly one.
fn decode_standard(value: Value) -> Result<StandardObservation, DecodeError> {
    let kind = ObservationKind::StandardObservation;
    let wire: WireStandard = shape(kind, value)?;
    let first = wire
        .obs
        .first()
        .ok_or(DecodeError::EmptyReadings { kind })?;
    let t = Tuple::new(kind, first, STANDARD_READING_LEN)?;

    let reading = StandardReading {
        timestamp: t.timestamp(0, "timestamp")?,
        wind_lull: t.optional(1),
        wind_avg: t.required(2, "wind_avg")?,
        wind_direction: t.required(3, "wind_direction")?,
        wind_gust: t.required(4, "wind_gust")?,
        wind_sample_interval: t.optional(5),
        station_pressure: t.required(6, "station_pressure")?,
        air_temperature: t.required(7, "air_temperature")?,
        relative_humidity: t.required(8, "relative_humidity")?,
        illuminance: t.optional(9),
        uv_index: t.optional(10),
        solar_radiation: t.optional(11),
        rain_accumulation: t.required(12, "rain_accumulation")?,
        precipitation_type: t.optional(13),
        lightning_avg_distance: t.optional(14),
        lightning_count: t.optional(15),
        battery_voltage: t.optional(16),
        report_interval: t.optional(17),
    };

    Ok(StandardObservation {
        serial_number: wire.serial_number,
        hub_serial_number: wire.hub_sn,
        firmware_revision: wire
            .firmware_revision
            .as_ref()
            .and_then(Value::as_u64)
            .and_then(|rev| u32::try_from(rev).ok()),
        reading,
    })
}

fn decode_rapid_wind(value: Value) -> Result<RapidWind, DecodeError> {
    let kind = ObservationKind::RapidWind;
    let wire: WireRapidWind = shape(kind, value)?;
    let t = Tuple::new(kind, &wire.ob, RAPID_WIND_READING_LEN)?;

    let reading = RapidWindReading {
        timestamp: t.timestamp(0, "timestamp")?,
        wind_speed: t.required(1, "wind_speed")?,
        wind_direction: t.required(2, "wind_direction")?,
    };

    Ok(RapidWind {
        serial_number: wire.serial_number,
        hub_serial_number: wire.hub_sn,
        reading,
    })
}

fn decode_precipitation(value: Value) -> Result<PrecipitationEvent, DecodeError> {
    let kind = ObservationKind::PrecipitationEvent;
    let wire: WirePrecipitation = shape(kind, value)?;
    let t = Tuple::new(kind, &wire.evt, PRECIP_READING_LEN)?;

    Ok(PrecipitationEvent {
        started_at: t.timestamp(0, "started_at")?,
        serial_number: wire.serial_number,
        hub_serial_number: wire.hub_sn,
    })
}
