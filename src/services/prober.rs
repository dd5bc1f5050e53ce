//! Single-endpoint HTTP probing

use crate::errors::{MonitorError, Result};
use crate::models::{CheckResult, EndpointSpec};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client as HttpClient;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, error};

/// Probes one endpoint and classifies the outcome.
///
/// Implementations must not fail: every outcome, including transport
/// errors, is reported as a `CheckResult`.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, spec: &EndpointSpec) -> CheckResult;
}

/// Prober backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: HttpClient,
}

impl HttpProber {
    pub fn new() -> Result<Self> {
        let client = HttpClient::builder()
            .user_agent(format!("endpoint_health_monitor/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(MonitorError::Http)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, spec: &EndpointSpec) -> CheckResult {
        let timestamp = Utc::now();
        let start_time = Instant::now();

        let request = self.client.get(&spec.url).timeout(spec.timeout()).send();

        let outcome = match timeout(spec.timeout(), request).await {
            Ok(Ok(response)) => Ok(response.status().as_u16()),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!("Request timed out after {}ms", spec.timeout_ms)),
        };
        let response_time_ms = start_time.elapsed().as_millis() as u64;

        match outcome {
            Ok(status_code) => {
                debug!(
                    "Endpoint {} responded {} in {}ms",
                    spec.name, status_code, response_time_ms
                );
                CheckResult::from_response(&spec.name, status_code, response_time_ms, timestamp)
            }
            Err(message) => {
                error!("Health check failed for {}: {}", spec.name, message);
                CheckResult::from_failure(&spec.name, message, response_time_ms, timestamp)
            }
        }
    }
}
