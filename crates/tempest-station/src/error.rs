//! Error types for the station binary.
//!
//! [`StationError`] wraps every failure that can stop the process during
//! startup or while serving.

/// Top-level error for the station binary.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: tempest_core::ConfigError,
    },

    /// The UDP listener could not start.
    #[error("listener error: {source}")]
    Listener {
        /// The underlying listener error.
        #[from]
        source: tempest_listener::ListenerError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: tempest_observer::ServerError,
    },

    /// The logging subscriber could not be installed.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the failure.
        message: String,
    },
}
