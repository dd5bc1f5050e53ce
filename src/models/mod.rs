pub mod check;
pub mod health;

pub use check::{CheckResult, CheckStatus, EndpointSpec};
pub use health::{
    AvailabilityMetrics, DetailedMetrics, EndpointDetail, HealthSnapshot, OverallStatus,
    RoundSummary,
};
