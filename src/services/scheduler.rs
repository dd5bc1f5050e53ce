//! Background task running check rounds on a fixed period

use crate::models::{CheckStatus, HealthSnapshot};
use crate::services::engine::HealthEngine;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(30);

/// Handle to a running scheduler. Dropping the handle closes the shutdown
/// channel, which also stops the loop.
pub struct SchedulerHandle {
    handle: JoinHandle<()>,
    shutdown_tx: watch::Sender<bool>,
}

impl SchedulerHandle {
    /// Signal the loop to stop and wait for it to exit
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.handle.await {
            warn!("Scheduler task ended abnormally: {}", e);
        }
        info!("Health check scheduler stopped");
    }
}

/// Start the periodic check loop. The first round runs immediately.
pub fn start(engine: Arc<HealthEngine>, period: Duration) -> SchedulerHandle {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let handle = tokio::spawn(async move {
        run_schedule(engine, period, shutdown_rx).await;
    });

    info!("Health check scheduler started with a {}s period", period.as_secs());

    SchedulerHandle {
        handle,
        shutdown_tx,
    }
}

async fn run_schedule(
    engine: Arc<HealthEngine>,
    period: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = shutdown_rx.changed() => break,
        }

        // Each round runs in its own task so a panic ends that round only.
        let round_engine = Arc::clone(&engine);
        let round = tokio::spawn(async move { round_engine.run_check_round().await });

        match round.await {
            Ok(snapshot) => log_round(&snapshot),
            Err(e) => error!("Scheduled health check round failed: {}", e),
        }
    }
}

/// One summary line per round, then one alert line per endpoint that is down
pub fn log_round(snapshot: &HealthSnapshot) {
    info!(
        overall_status = %snapshot.overall_status,
        healthy = snapshot.healthy_endpoints,
        total = snapshot.total_endpoints,
        "[{}] Health Check: {} - {}/{} services healthy",
        snapshot.last_check.to_rfc3339(),
        snapshot.overall_status,
        snapshot.healthy_endpoints,
        snapshot.total_endpoints
    );

    for check in snapshot.checks.iter().filter(|c| c.status == CheckStatus::Down) {
        error!(
            endpoint = %check.endpoint,
            "ALERT: {} is DOWN - {}",
            check.endpoint,
            check.error.as_deref().unwrap_or("Unknown error")
        );
    }
}
