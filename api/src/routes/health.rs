//! Health check endpoint

use std::collections::HashMap;

use actix_web::{web, HttpResponse};

use hotel_shared::types::{HealthResponse, HealthStatus, ServiceHealth};

use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}

/// Report backend reachability
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Every backend is reachable"),
        (status = 503, description = "A backend is unreachable")
    )
)]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let mut services = HashMap::new();

    let database = match state.store.health_check().await {
        Ok(()) => ServiceHealth::healthy(),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            ServiceHealth::unhealthy("database unreachable")
        }
    };
    services.insert("database".to_string(), database);

    let cache = match state.cache.health_check().await {
        Ok(_) => ServiceHealth::healthy(),
        Err(e) => {
            tracing::warn!(error = %e, "Cache health check failed");
            ServiceHealth::unhealthy("cache unreachable")
        }
    };
    services.insert("cache".to_string(), cache);

    let response = HealthResponse::from_services(services, env!("CARGO_PKG_VERSION"));
    match response.status {
        HealthStatus::Unhealthy => HttpResponse::ServiceUnavailable().json(response),
        _ => HttpResponse::Ok().json(response),
    }
}
