//! Configuration loading and typed config structures for the station
//! dashboard.
//!
//! The configuration lives in `tempest-config.yaml` (path overridable via
//! `TEMPEST_CONFIG`). Every key is optional; a missing file means all
//! defaults.

use std::path::Path;

use serde::Deserialize;

/// Environment variable naming the config file.
pub const ENV_CONFIG_PATH: &str = "TEMPEST_CONFIG";

/// Config file used when `TEMPEST_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "tempest-config.yaml";

/// Environment variable overriding [`StationConfig::udp_port`].
pub const ENV_UDP_PORT: &str = "TEMPEST_UDP_PORT";

/// Environment variable overriding [`StationConfig::http_port`].
pub const ENV_HTTP_PORT: &str = "TEMPEST_HTTP_PORT";

/// Largest payload a UDP datagram over IPv4 can carry.
pub const MAX_UDP_PAYLOAD: usize = 65_507;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is outside its allowed range.
    #[error("invalid config value for {key}: {reason}")]
    Invalid {
        /// The offending key.
        key: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Log output format for the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Top-level station configuration.
///
/// Mirrors the structure of `tempest-config.yaml`. All fields have
/// defaults matching the hub's standard broadcast setup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StationConfig {
    /// Address the packet listener binds to.
    #[serde(default = "default_udp_host")]
    pub udp_host: String,

    /// Port the packet listener binds to (hub broadcasts on 50222).
    #[serde(default = "default_udp_port")]
    pub udp_port: u16,

    /// Receive buffer size; longer datagrams are truncated by the OS.
    #[serde(default = "default_max_packet_size")]
    pub max_packet_size: usize,

    /// Address the HTTP server binds to.
    #[serde(default = "default_http_host")]
    pub http_host: String,

    /// Port the HTTP server binds to.
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            udp_host: default_udp_host(),
            udp_port: default_udp_port(),
            max_packet_size: default_max_packet_size(),
            http_host: default_http_host(),
            http_port: default_http_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl StationConfig {
    /// Load configuration from a YAML file, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise start from defaults.
    /// Environment overrides apply either way.
    ///
    /// # Errors
    ///
    /// Same as [`StationConfig::from_file`].
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment lookups.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml rejects an empty document; treat it as "all defaults".
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `TEMPEST_UDP_PORT` / `TEMPEST_HTTP_PORT` from the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is not a port number.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply port overrides from an arbitrary lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a value is not a port number.
    pub fn apply_overrides_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup(ENV_UDP_PORT) {
            self.udp_port = parse_port(ENV_UDP_PORT, &val)?;
        }
        if let Some(val) = lookup(ENV_HTTP_PORT) {
            self.http_port = parse_port(ENV_HTTP_PORT, &val)?;
        }
        Ok(())
    }

    /// Check value ranges that the type system does not.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_packet_size == 0 || self.max_packet_size > MAX_UDP_PAYLOAD {
            return Err(ConfigError::Invalid {
                key: "max_packet_size",
                reason: format!(
                    "{} is outside 1..={MAX_UDP_PAYLOAD}",
                    self.max_packet_size
                ),
            });
        }
        if self.udp_host.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "udp_host",
                reason: String::from("must not be empty"),
            });
        }
        if self.http_host.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "http_host",
                reason: String::from("must not be empty"),
            });
        }
        Ok(())
    }
}

fn parse_port(key: &'static str, raw: &str) -> Result<u16, ConfigError> {
    raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
        key,
        reason: format!("{raw:?} is not a port number: {e}"),
    })
}

fn default_udp_host() -> String {
    String::from("0.0.0.0")
}

const fn default_udp_port() -> u16 {
    50222
}

const fn default_max_packet_size() -> usize {
    4096
}

fn default_http_host() -> String {
    String::from("0.0.0.0")
}

const fn default_http_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = StationConfig::default();
        assert_eq!(config.udp_port, 50222);
        assert_eq!(config.http_port, 5000);
        assert_eq!(config.max_packet_size, 4096);
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
udp_host: "127.0.0.1"
udp_port: 50223
max_packet_size: 2048
http_host: "127.0.0.1"
http_port: 8080
log_level: "debug"
log_format: json
"#;

        let config = StationConfig::parse(yaml);
        assert!(config.is_ok(), "{config:?}");
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.udp_host, "127.0.0.1");
        assert_eq!(config.udp_port, 50223);
        assert_eq!(config.max_packet_size, 2048);
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = StationConfig::parse("udp_port: 6000\n")
            .ok()
            .unwrap_or_default();

        assert_eq!(config.udp_port, 6000);
        assert_eq!(config.http_port, 5000);
        assert_eq!(config.max_packet_size, 4096);
    }

    #[test]
    fn parse_empty_yaml() {
        let config = StationConfig::parse("");
        assert_eq!(config.ok(), Some(StationConfig::default()));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let config = StationConfig::parse("udp_prot: 6000\n");
        assert!(matches!(config, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn zero_packet_size_is_invalid() {
        let config = StationConfig::parse("max_packet_size: 0\n");
        assert!(matches!(
            config,
            Err(ConfigError::Invalid {
                key: "max_packet_size",
                ..
            })
        ));
    }

    #[test]
    fn oversized_packet_size_is_invalid() {
        let config = StationConfig::parse("max_packet_size: 70000\n");
        assert!(config.is_err());
    }

    #[test]
    fn overrides_replace_ports() {
        let mut config = StationConfig::default();
        let result = config.apply_overrides_from(|key| match key {
            ENV_UDP_PORT => Some(String::from("50300")),
            ENV_HTTP_PORT => Some(String::from(" 8081 ")),
            _ => None,
        });
        assert!(result.is_ok());
        assert_eq!(config.udp_port, 50300);
        assert_eq!(config.http_port, 8081);
    }

    #[test]
    fn bad_override_is_reported() {
        let mut config = StationConfig::default();
        let result = config.apply_overrides_from(|key| {
            (key == ENV_UDP_PORT).then(|| String::from("not-a-port"))
        });
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: ENV_UDP_PORT,
                ..
            })
        ));
        assert_eq!(config.udp_port, 50222);
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("tempest-config.yaml");
        if path.exists() {
            let config = StationConfig::parse(&std::fs::read_to_string(&path).unwrap_or_default());
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
