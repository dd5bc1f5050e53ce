use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A monitored endpoint. Built once from configuration and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSpec {
    pub name: String,
    pub url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl EndpointSpec {
    pub fn new(name: impl Into<String>, url: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            timeout_ms,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Up,
    Down,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Up => write!(f, "UP"),
            CheckStatus::Down => write!(f, "DOWN"),
        }
    }
}

/// Outcome of a single probe against one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub endpoint: String,
    pub status: CheckStatus,
    #[serde(rename = "responseTime")]
    pub response_time_ms: u64,
    pub status_code: Option<u16>,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl CheckResult {
    /// A response was received. Only 2xx counts as `UP`.
    pub fn from_response(
        endpoint: &str,
        status_code: u16,
        response_time_ms: u64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let status = if (200..300).contains(&status_code) {
            CheckStatus::Up
        } else {
            CheckStatus::Down
        };

        Self {
            endpoint: endpoint.to_string(),
            status,
            response_time_ms,
            status_code: Some(status_code),
            error: None,
            timestamp,
        }
    }

    /// No response was received (timeout, DNS, refused connection, ...).
    pub fn from_failure(
        endpoint: &str,
        error: impl Into<String>,
        response_time_ms: u64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            status: CheckStatus::Down,
            response_time_ms,
            status_code: None,
            error: Some(error.into()),
            timestamp,
        }
    }

    pub fn is_up(&self) -> bool {
        self.status == CheckStatus::Up
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_classification() {
        let now = Utc::now();

        let ok = CheckResult::from_response("svc", 204, 12, now);
        assert_eq!(ok.status, CheckStatus::Up);
        assert_eq!(ok.status_code, Some(204));
        assert!(ok.error.is_none());

        let redirect = CheckResult::from_response("svc", 301, 12, now);
        assert_eq!(redirect.status, CheckStatus::Down);

        let unavailable = CheckResult::from_response("svc", 503, 12, now);
        assert_eq!(unavailable.status, CheckStatus::Down);
        assert_eq!(unavailable.status_code, Some(503));
        assert!(unavailable.error.is_none());
    }

    #[test]
    fn test_failure_has_no_status_code() {
        let result = CheckResult::from_failure("svc", "connection refused", 3, Utc::now());
        assert_eq!(result.status, CheckStatus::Down);
        assert!(result.status_code.is_none());
        assert_eq!(result.error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_json_field_names() {
        let result = CheckResult::from_response("service-1", 200, 42, Utc::now());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["endpoint"], "service-1");
        assert_eq!(json["status"], "UP");
        assert_eq!(json["responseTime"], 42);
        assert_eq!(json["statusCode"], 200);
        assert!(json["error"].is_null());
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }
}
