use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::models::{AvailabilityMetrics, CheckResult, OverallStatus};
use crate::state::AppState;

const DEFAULT_HISTORY_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub endpoint: String,
    pub history: Vec<CheckResult>,
    pub metrics: AvailabilityMetrics,
}

/// 200 when healthy, 207 when degraded, 503 otherwise
pub fn status_code_for(status: OverallStatus) -> StatusCode {
    match status {
        OverallStatus::Healthy => StatusCode::OK,
        OverallStatus::Degraded => StatusCode::MULTI_STATUS,
        OverallStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

// Run a check round and report it
pub async fn get_health(data: web::Data<AppState>) -> impl Responder {
    info!("Request for current health");
    let snapshot = data.engine.run_check_round().await;

    HttpResponse::build(status_code_for(snapshot.overall_status)).json(snapshot)
}

// Run a check round and attach availability for every endpoint
pub async fn get_detailed_health(data: web::Data<AppState>) -> impl Responder {
    info!("Request for detailed health metrics");
    let detailed = data.engine.detailed_metrics().await;

    HttpResponse::Ok().json(detailed)
}

// Stored results for one endpoint
pub async fn get_endpoint_history(
    data: web::Data<AppState>,
    endpoint: web::Path<String>,
    query: web::Query<HistoryQuery>,
) -> impl Responder {
    let endpoint = endpoint.into_inner();
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    info!("Request for history of endpoint: {} (limit {})", endpoint, limit);

    let history = data.engine.endpoint_history(&endpoint, limit).await;
    if history.is_empty() {
        info!("No history found for endpoint: {}", endpoint);
        return HttpResponse::NotFound().json(json!({
            "error": format!("No history found for endpoint: {}", endpoint)
        }));
    }

    let metrics = data.engine.availability(&endpoint).await;
    HttpResponse::Ok().json(HistoryResponse {
        endpoint,
        history,
        metrics,
    })
}
