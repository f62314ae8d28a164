//! Server configuration read from environment variables.
//!
//! HOST (default 0.0.0.0), PORT (default 8080), COMPETITION_TTL_HOURS (default 12),
//! CLEANUP_INTERVAL_MINUTES (default 30).

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Competitions not touched for this long are dropped from memory.
    pub competition_ttl: Duration,
    pub cleanup_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            competition_ttl: Duration::from_secs(12 * 3600),
            cleanup_interval: Duration::from_secs(30 * 60),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = parse_var(&lookup, "PORT")? {
            config.port = port;
        }
        if let Some(hours) = parse_var::<u64>(&lookup, "COMPETITION_TTL_HOURS")? {
            let secs = hours.checked_mul(3600).ok_or(ConfigError::InvalidValue {
                key: "COMPETITION_TTL_HOURS",
                value: hours.to_string(),
            })?;
            config.competition_ttl = Duration::from_secs(secs);
        }
        if let Some(minutes) = parse_var::<u64>(&lookup, "CLEANUP_INTERVAL_MINUTES")? {
            if minutes == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "CLEANUP_INTERVAL_MINUTES",
                    value: minutes.to_string(),
                });
            }
            let secs = minutes.checked_mul(60).ok_or(ConfigError::InvalidValue {
                key: "CLEANUP_INTERVAL_MINUTES",
                value: minutes.to_string(),
            })?;
            config.cleanup_interval = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}
