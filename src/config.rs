//! Configuration management for the health monitor

use crate::errors::{MonitorError, Result};
use crate::models::EndpointSpec;
use crate::services::history::DEFAULT_HISTORY_CAPACITY;
use crate::services::scheduler::DEFAULT_CHECK_INTERVAL;

use serde::Deserialize;
use std::collections::HashSet;
use std::env;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Upper bound on results kept per endpoint
pub const MAX_HISTORY_CAPACITY: usize = 10_000;

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP API listens on
    pub bind_address: String,

    /// Period between scheduled check rounds
    pub check_interval: Duration,

    /// Results kept per endpoint
    pub history_capacity: usize,

    /// Timeout applied to file entries that omit one
    pub default_timeout_ms: u64,

    /// Endpoints to monitor, fixed for the life of the process
    pub endpoints: Vec<EndpointSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            check_interval: DEFAULT_CHECK_INTERVAL,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
            endpoints: default_endpoints(),
        }
    }
}

/// Entry as written in an endpoints file
#[derive(Debug, Deserialize)]
struct EndpointEntry {
    name: String,
    url: String,
    timeout: Option<u64>,
}

/// The three reference endpoints monitored when no file is given
pub fn default_endpoints() -> Vec<EndpointSpec> {
    vec![
        EndpointSpec::new("service-1", "https://knowmate.com", DEFAULT_TIMEOUT_MS),
        EndpointSpec::new("service-2", "https://ppmt.myclassform.com", DEFAULT_TIMEOUT_MS),
        EndpointSpec::new("service-3", "https://myclassform.com", DEFAULT_TIMEOUT_MS),
    ]
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(bind_address) = env::var("BIND_ADDRESS") {
            config.bind_address = bind_address;
        }

        if let Ok(interval) = env::var("CHECK_INTERVAL_SECONDS") {
            if let Ok(seconds) = interval.parse::<u64>() {
                config.check_interval = Duration::from_secs(seconds);
            }
        }

        if let Ok(capacity) = env::var("HISTORY_CAPACITY") {
            if let Ok(size) = capacity.parse() {
                config.history_capacity = size;
            }
        }

        if let Ok(timeout) = env::var("DEFAULT_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                config.default_timeout_ms = ms;
            }
        }

        config
    }

    /// Replace the endpoint list with the contents of a JSON file
    pub fn load_endpoints(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        self.endpoints = parse_endpoints(&raw, self.default_timeout_ms)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.endpoints.is_empty() {
            return Err(MonitorError::Config(
                "at least one endpoint must be configured".to_string(),
            ));
        }

        if self.check_interval.is_zero() {
            return Err(MonitorError::Config(
                "check_interval must be greater than 0".to_string(),
            ));
        }

        if self.history_capacity == 0 || self.history_capacity > MAX_HISTORY_CAPACITY {
            return Err(MonitorError::Config(format!(
                "history_capacity must be between 1 and {}",
                MAX_HISTORY_CAPACITY
            )));
        }

        let mut seen = HashSet::new();
        for endpoint in &self.endpoints {
            if endpoint.name.is_empty() {
                return Err(MonitorError::Config("endpoint name cannot be empty".to_string()));
            }

            if !seen.insert(endpoint.name.as_str()) {
                return Err(MonitorError::Config(format!(
                    "duplicate endpoint name: {}",
                    endpoint.name
                )));
            }

            let url = reqwest::Url::parse(&endpoint.url).map_err(|e| {
                MonitorError::Config(format!("invalid url for {}: {}", endpoint.name, e))
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(MonitorError::Config(format!(
                    "url for {} must use http or https",
                    endpoint.name
                )));
            }

            if endpoint.timeout_ms == 0 {
                return Err(MonitorError::Config(format!(
                    "timeout for {} must be greater than 0",
                    endpoint.name
                )));
            }
        }

        Ok(())
    }
}

fn parse_endpoints(raw: &str, default_timeout_ms: u64) -> Result<Vec<EndpointSpec>> {
    let entries: Vec<EndpointEntry> = serde_json::from_str(raw)?;

    Ok(entries
        .into_iter()
        .map(|entry| {
            EndpointSpec::new(
                entry.name,
                entry.url,
                entry.timeout.unwrap_or(default_timeout_ms),
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.endpoints.len(), 3);
        assert_eq!(config.check_interval, Duration::from_secs(30));
        assert_eq!(config.history_capacity, 100);
        assert_ok!(config.validate());
    }

    #[test]
    fn test_load_endpoints_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"name": "api", "url": "http://localhost:9000/health", "timeout": 1500}},
                {{"name": "web", "url": "https://example.com"}}
            ]"#
        )
        .unwrap();

        let mut config = Config::default();
        config.load_endpoints(file.path()).unwrap();

        assert_eq!(config.endpoints.len(), 2);
        assert_eq!(config.endpoints[0].timeout_ms, 1500);
        assert_eq!(config.endpoints[1].timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_ok!(config.validate());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let mut config = Config::default();
        let err = config.load_endpoints("/nonexistent/endpoints.json").unwrap_err();
        assert!(matches!(err, MonitorError::Io(_)));
    }

    #[test]
    fn test_malformed_file_is_json_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"name\": ").unwrap();

        let mut config = Config::default();
        let err = config.load_endpoints(file.path()).unwrap_err();
        assert!(matches!(err, MonitorError::Json(_)));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut config = Config::default();
        config.endpoints = vec![
            EndpointSpec::new("dup", "https://a.example", 1000),
            EndpointSpec::new("dup", "https://b.example", 1000),
        ];
        assert_err!(config.validate());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.endpoints = vec![EndpointSpec::new("ftp", "ftp://files.example", 1000)];
        assert_err!(config.validate());

        config.endpoints = vec![EndpointSpec::new("zero", "https://a.example", 0)];
        assert_err!(config.validate());

        config.endpoints = Vec::new();
        assert_err!(config.validate());

        let mut config = Config::default();
        config.history_capacity = 0;
        assert_err!(config.validate());

        config.history_capacity = usize::MAX;
        assert_err!(config.validate());

        config.history_capacity = MAX_HISTORY_CAPACITY;
        assert_ok!(config.validate());

        let mut config = Config::default();
        config.check_interval = Duration::ZERO;
        assert_err!(config.validate());
    }
}
