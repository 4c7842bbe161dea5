//! Station binary for the Tempest dashboard.
//!
//! Runs the UDP packet listener and the HTTP dashboard in one process,
//! sharing a single in-memory observation store.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `tempest-config.yaml` (or `TEMPEST_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Create the observation store and listener counters
//! 4. Bind the UDP listener (fatal on failure) and spawn its loop
//! 5. Serve the dashboard until Ctrl-C

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use tempest_core::config::{DEFAULT_CONFIG_PATH, ENV_CONFIG_PATH};
use tempest_core::{ListenerStats, LogFormat, ObservationStore, StationConfig};
use tempest_listener::PacketListener;
use tempest_observer::{start_server, AppState};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::StationError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, either socket cannot be
/// bound, or the HTTP server fails.
#[tokio::main]
async fn main() -> Result<(), StationError> {
    // 1. Load configuration.
    let config_path = std::env::var_os(ENV_CONFIG_PATH)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = StationConfig::load_or_default(&config_path)?;

    // 2. Initialize structured logging.
    init_logging(&config)?;

    info!("tempest-station starting");
    info!(
        path = %config_path.display(),
        from_file = config_path.exists(),
        udp_port = config.udp_port,
        http_port = config.http_port,
        max_packet_size = config.max_packet_size,
        "Configuration loaded"
    );

    // 3. Shared state.
    let store = Arc::new(ObservationStore::new());
    let stats = Arc::new(ListenerStats::new());

    // 4. UDP listener. Without it the dashboard could only ever be empty.
    let listener =
        match PacketListener::bind(&config, Arc::clone(&store), Arc::clone(&stats)).await {
            Ok(listener) => listener,
            Err(e) => {
                error!(error = %e, "cannot receive hub broadcasts, exiting");
                return Err(e.into());
            }
        };
    let listener_handle = listener.spawn();
    info!("Packet listener started");

    // 5. Dashboard server.
    let app_state = Arc::new(AppState::new(store, stats));
    let result = start_server(&config, app_state, shutdown_signal()).await;

    listener_handle.abort();
    if let Err(e) = &result {
        error!(error = %e, "dashboard server failed");
    }
    result?;

    info!("tempest-station shutdown complete");
    Ok(())
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `log_level` from the config file.
fn init_logging(config: &StationConfig) -> Result<(), StationError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| StationError::Logging {
            message: format!("invalid log level {:?}: {e}", config.log_level),
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match config.log_format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| StationError::Logging {
        message: e.to_string(),
    })
}

/// Resolve when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
