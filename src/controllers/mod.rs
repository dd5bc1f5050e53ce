use actix_web::web;

pub mod health;
pub mod info;

/// Register every route on an actix `App`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(info::get_info))
        .route("/health", web::get().to(health::get_health))
        .route("/health/detailed", web::get().to(health::get_detailed_health))
        .route(
            "/health/history/{endpoint}",
            web::get().to(health::get_endpoint_history),
        );
}
