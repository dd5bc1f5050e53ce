//! Endpoint Health Monitor Library
//!
//! Polls a fixed set of HTTP endpoints, keeps a bounded history of results
//! per endpoint and derives availability and overall health from it.

pub mod config;
pub mod controllers;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use errors::{MonitorError, Result};
pub use models::{CheckResult, CheckStatus, EndpointSpec, HealthSnapshot, OverallStatus};
pub use services::engine::HealthEngine;
pub use services::prober::{HttpProber, Prober};
pub use state::AppState;
