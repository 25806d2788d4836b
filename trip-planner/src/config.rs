//! Application configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::discovery::{DEFAULT_BASE_URL, DiscoveryConfig};

/// Default address the web server binds to.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Default directory for static assets.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Environment variable names.
pub mod vars {
    pub const API_BASE_URL: &str = "TRIP_API_BASE_URL";
    pub const LISTEN_ADDR: &str = "TRIP_LISTEN_ADDR";
    pub const REQUEST_TIMEOUT_SECS: &str = "TRIP_REQUEST_TIMEOUT_SECS";
    pub const MOCK_DATA: &str = "TRIP_MOCK_DATA";
    pub const STATIC_DIR: &str = "TRIP_STATIC_DIR";
}

/// Errors reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var} must be a whole number of seconds: {value}")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Discovery service base URL.
    pub api_base_url: String,

    /// Address to serve the web interface on.
    pub listen_addr: SocketAddr,

    /// Upper bound on each discovery request. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,

    /// Serve this fixture file instead of calling the discovery service.
    pub mock_data: Option<PathBuf>,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen_value = get(vars::LISTEN_ADDR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddr {
                var: vars::LISTEN_ADDR,
                value: listen_value.clone(),
            })?;

        let request_timeout = get(vars::REQUEST_TIMEOUT_SECS)
            .map(|value| {
                value
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| ConfigError::InvalidTimeout {
                        var: vars::REQUEST_TIMEOUT_SECS,
                        value,
                    })
            })
            .transpose()?;

        Ok(Self {
            api_base_url: get(vars::API_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            listen_addr,
            request_timeout,
            mock_data: get(vars::MOCK_DATA).map(PathBuf::from),
            static_dir: get(vars::STATIC_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
        })
    }

    /// Client settings derived from this configuration.
    pub fn discovery(&self) -> DiscoveryConfig {
        DiscoveryConfig::new(&self.api_base_url).with_timeout(self.request_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.listen_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.mock_data, None);
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (vars::API_BASE_URL, "https://trips.example.com/"),
            (vars::LISTEN_ADDR, "0.0.0.0:8080"),
            (vars::REQUEST_TIMEOUT_SECS, "15"),
            (vars::MOCK_DATA, "data/sample_destinations.json"),
            (vars::STATIC_DIR, "/srv/static"),
        ]))
        .unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
        assert_eq!(
            config.mock_data,
            Some(PathBuf::from("data/sample_destinations.json"))
        );
        assert_eq!(config.static_dir, PathBuf::from("/srv/static"));

        let discovery = config.discovery();
        assert_eq!(discovery.base_url, "https://trips.example.com");
        assert_eq!(discovery.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = AppConfig::from_lookup(lookup(&[(vars::REQUEST_TIMEOUT_SECS, " ")])).unwrap();
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(vars::LISTEN_ADDR, "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddr { .. }));

        let err =
            AppConfig::from_lookup(lookup(&[(vars::REQUEST_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "TRIP_REQUEST_TIMEOUT_SECS must be a whole number of seconds: soon"
        );
    }
}
