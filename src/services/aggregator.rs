//! Availability and overall-status calculations

use crate::models::{AvailabilityMetrics, CheckResult, OverallStatus};

/// Availability over a run of stored checks.
///
/// An empty history is a defined zero state rather than an error.
pub fn availability(history: &[CheckResult]) -> AvailabilityMetrics {
    if history.is_empty() {
        return AvailabilityMetrics::empty();
    }

    let total = history.len();
    let up = history.iter().filter(|check| check.is_up()).count();
    let response_time_sum: u64 = history.iter().map(|check| check.response_time_ms).sum();

    AvailabilityMetrics {
        availability: round2(up as f64 * 100.0 / total as f64),
        avg_response_time: round2(response_time_sum as f64 / total as f64),
        total_checks: total,
    }
}

/// Majority rule over one round: no failures is `HEALTHY`, failures in the
/// minority is `DEGRADED`, anything else (including a tie) is `UNHEALTHY`.
///
/// This is a coarse heuristic and does not weight endpoints.
pub fn overall_status(checks: &[CheckResult]) -> OverallStatus {
    let (healthy, unhealthy) = count_by_status(checks);

    if unhealthy == 0 {
        OverallStatus::Healthy
    } else if healthy > unhealthy {
        OverallStatus::Degraded
    } else {
        OverallStatus::Unhealthy
    }
}

/// `(up, down)` counts
pub fn count_by_status(checks: &[CheckResult]) -> (usize, usize) {
    let up = checks.iter().filter(|check| check.is_up()).count();
    (up, checks.len() - up)
}

/// Round half-up to two decimals. Inputs are never negative here.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
