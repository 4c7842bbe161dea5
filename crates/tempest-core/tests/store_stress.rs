//! Race-stress tests for the observation store.
//!
//! Writers publish messages whose every field is derived from a single
//! sequence number; readers check that each snapshot slot is internally
//! consistent. A torn read would show fields from two different writes.

#![allow(clippy::unwrap_used, clippy::float_cmp, clippy::cast_precision_loss)]

use std::sync::Arc;

use tempest_core::store::ObservationStore;
use tempest_types::{
    PrecipitationEvent, RapidWind, RapidWindReading, StandardObservation, StandardReading,
};

const WRITERS: u64 = 4;
const WRITES_PER_WRITER: u64 = 2_000;
const READERS: usize = 8;
const READS_PER_READER: usize = 2_000;

fn standard(seq: u64) -> StandardObservation {
    let v = seq as f64;
    StandardObservation {
        serial_number: format!("ST-{seq}"),
        hub_serial_number: Some(format!("HB-{seq}")),
        firmware_revision: None,
        reading: StandardReading {
            timestamp: i64::try_from(seq).unwrap(),
            wind_lull: Some(v),
            wind_avg: v,
            wind_direction: v,
            wind_gust: v,
            wind_sample_interval: Some(v),
            station_pressure: v,
            air_temperature: v,
            relative_humidity: v,
            illuminance: Some(v),
            uv_index: Some(v),
            solar_radiation: Some(v),
            rain_accumulation: v,
            precipitation_type: Some(v),
            lightning_avg_distance: Some(v),
            lightning_count: Some(v),
            battery_voltage: Some(v),
            report_interval: Some(v),
        },
    }
}

fn rapid_wind(seq: u64) -> RapidWind {
    let v = seq as f64;
    RapidWind {
        serial_number: format!("ST-{seq}"),
        hub_serial_number: None,
        reading: RapidWindReading {
            timestamp: i64::try_from(seq).unwrap(),
            wind_speed: v,
            wind_direction: v,
        },
    }
}

fn precipitation(seq: u64) -> PrecipitationEvent {
    PrecipitationEvent {
        serial_number: format!("ST-{seq}"),
        hub_serial_number: Some(format!("HB-{seq}")),
        started_at: i64::try_from(seq).unwrap(),
    }
}

fn standard_is_consistent(obs: &StandardObservation) -> bool {
    let seq = obs.reading.timestamp;
    let v = seq as f64;
    let r = &obs.reading;
    obs.serial_number == format!("ST-{seq}")
        && obs.hub_serial_number == Some(format!("HB-{seq}"))
        && [
            r.wind_avg,
            r.wind_direction,
            r.wind_gust,
            r.station_pressure,
            r.air_temperature,
            r.relative_humidity,
            r.rain_accumulation,
        ]
        .iter()
        .all(|&x| x == v)
        && [
            r.wind_lull,
            r.wind_sample_interval,
            r.illuminance,
            r.uv_index,
            r.solar_radiation,
            r.precipitation_type,
            r.lightning_avg_distance,
            r.lightning_count,
            r.battery_voltage,
            r.report_interval,
        ]
        .iter()
        .all(|&x| x == Some(v))
}

fn rapid_wind_is_consistent(obs: &RapidWind) -> bool {
    let seq = obs.reading.timestamp;
    let v = seq as f64;
    obs.serial_number == format!("ST-{seq}")
        && obs.reading.wind_speed == v
        && obs.reading.wind_direction == v
}

fn precipitation_is_consistent(evt: &PrecipitationEvent) -> bool {
    let seq = evt.started_at;
    evt.serial_number == format!("ST-{seq}") && evt.hub_serial_number == Some(format!("HB-{seq}"))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_reads_never_observe_torn_writes() {
    let store = Arc::new(ObservationStore::new());

    let mut writers = Vec::new();
    for w in 0..WRITERS {
        let store = Arc::clone(&store);
        writers.push(tokio::spawn(async move {
            for i in 0..WRITES_PER_WRITER {
                let seq = w * WRITES_PER_WRITER + i;
                store.record(standard(seq).into()).await;
                store.record(rapid_wind(seq).into()).await;
                store.record(precipitation(seq).into()).await;
                tokio::task::yield_now().await;
            }
        }));
    }

    let mut readers = Vec::new();
    for _ in 0..READERS {
        let store = Arc::clone(&store);
        readers.push(tokio::spawn(async move {
            let mut torn = 0_usize;
            for _ in 0..READS_PER_READER {
                let snap = store.snapshot().await;
                if let Some(s) = &snap.standard
                    && !standard_is_consistent(&s.observation)
                {
                    torn += 1;
                }
                if let Some(s) = &snap.rapid_wind
                    && !rapid_wind_is_consistent(&s.observation)
                {
                    torn += 1;
                }
                if let Some(s) = &snap.precipitation
                    && !precipitation_is_consistent(&s.observation)
                {
                    torn += 1;
                }
                tokio::task::yield_now().await;
            }
            torn
        }));
    }

    for writer in writers {
        writer.await.unwrap();
    }
    let mut torn_total = 0;
    for reader in readers {
        torn_total += reader.await.unwrap();
    }
    assert_eq!(torn_total, 0, "readers observed torn writes");

    // Every slot ends up holding one complete write.
    let snap = store.snapshot().await;
    assert!(standard_is_consistent(&snap.standard.unwrap().observation));
    assert!(rapid_wind_is_consistent(&snap.rapid_wind.unwrap().observation));
    assert!(precipitation_is_consistent(&snap.precipitation.unwrap().observation));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn reads_complete_while_writer_is_busy() {
    let store = Arc::new(ObservationStore::new());

    let writer = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for seq in 0..5_000 {
                store.record(rapid_wind(seq).into()).await;
            }
        })
    };

    for _ in 0..1_000 {
        if let Some(s) = store.snapshot().await.rapid_wind {
            assert!(rapid_wind_is_consistent(&s.observation));
        }
    }
    writer.await.unwrap();

    let last = store.snapshot().await.rapid_wind.unwrap();
    assert_eq!(last.observation.reading.timestamp, 4_999);
}
