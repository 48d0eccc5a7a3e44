//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_CAPACITY_BYTES;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Total size budget of the cache in bytes
    pub capacity_bytes: u64,
    /// TTL in milliseconds for entries set without one, None = never expire
    pub default_ttl_ms: Option<u64>,
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds, 0 disables the sweep
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY_BYTES` - Size budget in bytes (default: 31457280, 30 MiB)
    /// - `DEFAULT_TTL_MS` - Default TTL in milliseconds (default: unset)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds, 0 = off (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity_bytes: parse_var("CACHE_CAPACITY_BYTES").unwrap_or(defaults.capacity_bytes),
            default_ttl_ms: parse_var("DEFAULT_TTL_MS").or(defaults.default_ttl_ms),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            sweep_interval: parse_var("SWEEP_INTERVAL").unwrap_or(defaults.sweep_interval),
        }
    }

    /// Default TTL as a Duration.
    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl_ms.map(Duration::from_millis)
    }

    /// Sweep interval, or None when the sweep is disabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval > 0).then(|| Duration::from_secs(self.sweep_interval))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity_bytes: DEFAULT_CAPACITY_BYTES,
            default_ttl_ms: None,
            server_port: 3000,
            sweep_interval: 1,
        }
    }
}

/// Reads and parses an environment variable, ignoring unset or malformed values.
fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
