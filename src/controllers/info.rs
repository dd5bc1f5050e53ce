use actix_web::{HttpResponse, Responder};
use serde_json::json;

// Static service metadata
pub async fn get_info() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "service": "Health Check Service",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Monitors service health and exposes metrics",
        "endpoints": {
            "GET /health": "Get current health status of all services",
            "GET /health/detailed": "Get detailed health metrics with availability",
            "GET /health/history/{endpoint}": "Get historical data for specific endpoint"
        }
    }))
}
