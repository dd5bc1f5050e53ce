use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::check::CheckResult;

/// Aggregate status of one round across all endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OverallStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverallStatus::Healthy => write!(f, "HEALTHY"),
            OverallStatus::Degraded => write!(f, "DEGRADED"),
            OverallStatus::Unhealthy => write!(f, "UNHEALTHY"),
        }
    }
}

/// Result of a single check round.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSnapshot {
    pub overall_status: OverallStatus,
    pub checks: Vec<CheckResult>,
    pub total_endpoints: usize,
    pub healthy_endpoints: usize,
    pub unhealthy_endpoints: usize,
    #[serde(rename = "uptime")]
    pub uptime_ms: u64,
    #[serde(rename = "lastCheck")]
    pub last_check: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityMetrics {
    /// Percentage of stored checks that were `UP`, two decimals
    pub availability: f64,
    /// Mean response time in milliseconds, two decimals
    pub avg_response_time: f64,
    pub total_checks: usize,
}

impl AvailabilityMetrics {
    pub fn empty() -> Self {
        Self {
            availability: 0.0,
            avg_response_time: 0.0,
            total_checks: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub total: usize,
    pub healthy: usize,
    pub unhealthy: usize,
}

/// Per-endpoint availability merged with the endpoint's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointDetail {
    pub name: String,
    pub url: String,
    #[serde(flatten)]
    pub metrics: AvailabilityMetrics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedMetrics {
    pub overall_status: OverallStatus,
    pub checks: Vec<CheckResult>,
    pub summary: RoundSummary,
    #[serde(rename = "uptime")]
    pub uptime_ms: u64,
    pub last_check: DateTime<Utc>,
    pub endpoint_details: Vec<EndpointDetail>,
}

impl DetailedMetrics {
    pub fn new(snapshot: HealthSnapshot, endpoint_details: Vec<EndpointDetail>) -> Self {
        Self {
            overall_status: snapshot.overall_status,
            summary: RoundSummary {
                total: snapshot.total_endpoints,
                healthy: snapshot.healthy_endpoints,
                unhealthy: snapshot.unhealthy_endpoints,
            },
            checks: snapshot.checks,
            uptime_ms: snapshot.uptime_ms,
            last_check: snapshot.last_check,
            endpoint_details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_detail_is_flat() {
        let detail = EndpointDetail {
            name: "service-1".to_string(),
            url: "https://example.com".to_string(),
            metrics: AvailabilityMetrics {
                availability: 75.0,
                avg_response_time: 120.5,
                total_checks: 4,
            },
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["name"], "service-1");
        assert_eq!(json["availability"], 75.0);
        assert_eq!(json["avgResponseTime"], 120.5);
        assert_eq!(json["totalChecks"], 4);
    }

    #[test]
    fn test_overall_status_serializes_uppercase() {
        assert_eq!(
            serde_json::to_value(OverallStatus::Degraded).unwrap(),
            serde_json::json!("DEGRADED")
        );
        assert_eq!(OverallStatus::Unhealthy.to_string(), "UNHEALTHY");
    }
}
