//! Server configuration module.
//!
//! Properties are a flat string-to-string map so servlets can carry
//! their own keys next to the built-in ones. Precedence, later wins:
//! built-in defaults, the optional JSON file, caller overrides. The
//! defaults are applied at read time, so merging two configs never
//! resurrects a default over an explicit value.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

/// Socket address the server binds to.
pub const SERVER_ADDRESS: &str = "serverAddress";
/// Number of permanent worker tasks.
pub const SERVER_THREADS: &str = "serverThreads";
/// Upper bound on workers under load.
pub const SERVER_THREADS_MAX: &str = "serverThreadsMax";
/// Idle time in milliseconds before a transient worker exits.
pub const SERVER_THREADS_KEEPALIVE: &str = "serverThreadsKeepalive";

const DEFAULT_ADDRESS: &str = "127.0.0.1:67";
const DEFAULT_THREADS: usize = 2;
const DEFAULT_THREADS_MAX: usize = 4;
const DEFAULT_KEEPALIVE_MS: u64 = 10_000;

#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    properties: HashMap<String, String>,
}

impl ServerConfig {
    /// An empty configuration. Absent keys fall back to built-in
    /// defaults when read.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads properties from a flat JSON object of strings. A missing
    /// file yields an empty configuration; an unreadable or malformed
    /// file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("no configuration file at {}, using defaults", path.display());
            return Ok(Self::new());
        }
        let contents = std::fs::read_to_string(path)?;
        let properties: HashMap<String, String> = serde_json::from_str(&contents)?;
        log::info!(
            "loaded {} properties from {}",
            properties.len(),
            path.display()
        );
        Ok(ServerConfig { properties })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Copies every explicit entry of `other` over this configuration.
    pub fn extend(&mut self, other: &ServerConfig) {
        for (key, value) in &other.properties {
            self.properties.insert(key.clone(), value.clone());
        }
    }

    pub fn socket_address(&self) -> Result<SocketAddr> {
        let value = self.get(SERVER_ADDRESS).unwrap_or(DEFAULT_ADDRESS);
        value
            .parse()
            .map_err(|_| bad_value(SERVER_ADDRESS, value))
    }

    pub fn threads(&self) -> Result<usize> {
        self.usize_property(SERVER_THREADS, DEFAULT_THREADS)
    }

    pub fn threads_max(&self) -> Result<usize> {
        self.usize_property(SERVER_THREADS_MAX, DEFAULT_THREADS_MAX)
    }

    pub fn keepalive(&self) -> Result<Duration> {
        let millis = match self.get(SERVER_THREADS_KEEPALIVE) {
            Some(value) => value
                .parse()
                .map_err(|_| bad_value(SERVER_THREADS_KEEPALIVE, value))?,
            None => DEFAULT_KEEPALIVE_MS,
        };
        Ok(Duration::from_millis(millis))
    }

    fn usize_property(&self, key: &'static str, default: usize) -> Result<usize> {
        match self.get(key) {
            Some(value) => value.parse().map_err(|_| bad_value(key, value)),
            None => Ok(default),
        }
    }
}

fn bad_value(key: &str, value: &str) -> Error {
    Error::Config(format!("unparsable value {:?} for {}", value, key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_keys_are_absent() {
        let config = ServerConfig::new();
        assert_eq!(config.socket_address().unwrap(), "127.0.0.1:67".parse().unwrap());
        assert_eq!(config.threads().unwrap(), 2);
        assert_eq!(config.threads_max().unwrap(), 4);
        assert_eq!(config.keepalive().unwrap(), Duration::from_millis(10_000));
    }

    #[test]
    fn explicit_values_win_over_defaults() {
        let mut config = ServerConfig::new();
        config.set(SERVER_ADDRESS, "0.0.0.0:6767");
        config.set(SERVER_THREADS, "8");
        assert_eq!(config.socket_address().unwrap(), "0.0.0.0:6767".parse().unwrap());
        assert_eq!(config.threads().unwrap(), 8);
    }

    #[test]
    fn overrides_win_over_earlier_sources() {
        let mut base = ServerConfig::new();
        base.set(SERVER_THREADS, "8");
        base.set(SERVER_THREADS_MAX, "16");

        let mut overrides = ServerConfig::new();
        overrides.set(SERVER_THREADS, "3");

        base.extend(&overrides);
        assert_eq!(base.threads().unwrap(), 3);
        assert_eq!(base.threads_max().unwrap(), 16);
    }

    #[test]
    fn unparsable_values_are_rejected() {
        let mut config = ServerConfig::new();
        config.set(SERVER_THREADS, "many");
        assert!(matches!(config.threads(), Err(Error::Config(_))));

        config.set(SERVER_ADDRESS, "not-an-address");
        assert!(config.socket_address().is_err());
    }
}
