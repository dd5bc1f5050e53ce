//! Health engine orchestrating probe rounds

use crate::models::{
    AvailabilityMetrics, CheckResult, DetailedMetrics, EndpointDetail, EndpointSpec,
    HealthSnapshot,
};
use crate::services::aggregator;
use crate::services::history::HistoryStore;
use crate::services::prober::Prober;

use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, instrument};

/// Owns the endpoint list, the prober and the history store.
///
/// Shared as `Arc<HealthEngine>` between the API and the scheduler. Rounds
/// may overlap; the history store serializes writes per endpoint.
pub struct HealthEngine {
    endpoints: Arc<[EndpointSpec]>,
    prober: Arc<dyn Prober>,
    history: HistoryStore,
    started_at: Instant,
}

impl HealthEngine {
    pub fn new(endpoints: Vec<EndpointSpec>, prober: Arc<dyn Prober>, history_capacity: usize) -> Self {
        let history = HistoryStore::new(
            endpoints.iter().map(|endpoint| endpoint.name.clone()),
            history_capacity,
        );

        Self {
            endpoints: endpoints.into(),
            prober,
            history,
            started_at: Instant::now(),
        }
    }

    pub fn endpoints(&self) -> &[EndpointSpec] {
        &self.endpoints
    }

    pub fn uptime_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }

    /// Probe every endpoint concurrently and record the results.
    ///
    /// Waits for all probes; one slow or failing endpoint never cancels the
    /// others. Results follow configuration order.
    #[instrument(skip(self))]
    pub async fn run_check_round(&self) -> HealthSnapshot {
        let tasks = self.endpoints.iter().cloned().map(|spec| {
            let prober = Arc::clone(&self.prober);
            let name = spec.name.clone();
            let handle = tokio::spawn(async move { prober.probe(&spec).await });
            (name, handle)
        });

        let (names, handles): (Vec<String>, Vec<_>) = tasks.unzip();
        let joined = join_all(handles).await;

        let mut checks = Vec::with_capacity(joined.len());
        for (name, outcome) in names.into_iter().zip(joined) {
            let result = match outcome {
                Ok(result) => result,
                Err(e) => {
                    error!("Probe task for {} failed: {}", name, e);
                    CheckResult::from_failure(&name, format!("Probe task failed: {}", e), 0, Utc::now())
                }
            };

            self.history.append(&name, result.clone()).await;
            checks.push(result);
        }

        let (healthy, unhealthy) = aggregator::count_by_status(&checks);
        let snapshot = HealthSnapshot {
            overall_status: aggregator::overall_status(&checks),
            total_endpoints: checks.len(),
            healthy_endpoints: healthy,
            unhealthy_endpoints: unhealthy,
            checks,
            uptime_ms: self.uptime_ms(),
            last_check: Utc::now(),
        };

        debug!(
            "Check round complete: {} ({}/{} healthy)",
            snapshot.overall_status, snapshot.healthy_endpoints, snapshot.total_endpoints
        );

        snapshot
    }

    /// Run a fresh round and attach per-endpoint availability.
    ///
    /// Always probes; there is no cached snapshot.
    pub async fn detailed_metrics(&self) -> DetailedMetrics {
        let snapshot = self.run_check_round().await;

        let mut details = Vec::with_capacity(self.endpoints.len());
        for endpoint in self.endpoints.iter() {
            details.push(EndpointDetail {
                name: endpoint.name.clone(),
                url: endpoint.url.clone(),
                metrics: self.availability(&endpoint.name).await,
            });
        }

        DetailedMetrics::new(snapshot, details)
    }

    /// Most recent `limit` results for an endpoint, oldest first.
    ///
    /// A non-positive limit returns the whole stored history.
    pub async fn endpoint_history(&self, endpoint_name: &str, limit: i64) -> Vec<CheckResult> {
        let limit = usize::try_from(limit).ok();
        self.history.get(endpoint_name, limit).await
    }

    pub async fn availability(&self, endpoint_name: &str) -> AvailabilityMetrics {
        let history = self.history.all(endpoint_name).await;
        aggregator::availability(&history)
    }

    pub async fn history_len(&self, endpoint_name: &str) -> usize {
        self.history.len(endpoint_name).await
    }
}
