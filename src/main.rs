//! Endpoint Health Monitor Binary

use actix_web::{web, App, HttpServer};
use clap::Parser;
use endpoint_health_monitor::services::scheduler;
use endpoint_health_monitor::{controllers, AppState, Config, HealthEngine, HttpProber, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line options; each falls back to its environment variable
#[derive(Debug, Parser)]
#[command(version, about = "Polls HTTP endpoints and serves their health")]
struct Cli {
    /// Address to bind the HTTP API to
    #[arg(long, env = "BIND_ADDRESS")]
    bind: Option<String>,

    /// JSON file listing endpoints as [{name, url, timeout}]
    #[arg(long, env = "ENDPOINTS_FILE")]
    endpoints_file: Option<PathBuf>,

    /// Seconds between scheduled check rounds
    #[arg(long, env = "CHECK_INTERVAL_SECONDS")]
    interval_secs: Option<u64>,
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    initialize_tracing();

    info!("Starting Endpoint Health Monitor v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config = match load_config(cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration validation failed: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Health Check Service initialized - Monitoring {} endpoints, bind: {}, interval: {}s",
        config.endpoints.len(),
        config.bind_address,
        config.check_interval.as_secs()
    );

    let prober = Arc::new(HttpProber::new()?);
    let engine = Arc::new(HealthEngine::new(
        config.endpoints.clone(),
        prober,
        config.history_capacity,
    ));

    let schedule = scheduler::start(Arc::clone(&engine), config.check_interval);

    let state = web::Data::new(AppState::new(Arc::clone(&engine)));
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(controllers::configure)
    })
    .bind(config.bind_address.as_str())?
    .run();

    info!("Server is live at http://{}", config.bind_address);
    let served = server.await;

    schedule.shutdown().await;
    served?;
    Ok(())
}

fn load_config(cli: Cli) -> Result<Config> {
    let mut config = Config::from_env();

    if let Some(bind) = cli.bind {
        config.bind_address = bind;
    }
    if let Some(path) = cli.endpoints_file {
        config.load_endpoints(path)?;
    }
    if let Some(seconds) = cli.interval_secs {
        config.check_interval = Duration::from_secs(seconds);
    }

    config.validate()?;
    Ok(config)
}

/// Initialize structured logging
fn initialize_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .json();

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
