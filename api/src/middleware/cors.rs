//! CORS configuration for browser clients.
//!
//! Origins come from [`CorsConfig`]; a `*` entry (or an empty list) accepts
//! any origin. Credentials are never allowed, since bearer tokens travel in
//! the `Authorization` header rather than in cookies.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use hotel_shared::CorsConfig;

/// Builds the CORS middleware for the configured origins
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::IF_NONE_MATCH,
            header::HeaderName::from_static("api-version"),
        ])
        .expose_headers(vec![
            header::ETAG,
            header::RETRY_AFTER,
            header::HeaderName::from_static("x-request-id"),
            header::HeaderName::from_static("x-rate-limit-limit"),
            header::HeaderName::from_static("x-rate-limit-remaining"),
            header::HeaderName::from_static("x-rate-limit-reset"),
        ])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        tracing::info!("CORS accepts any origin");
        return cors.allow_any_origin();
    }

    for origin in config.allowed_origins.iter().map(|o| o.trim()) {
        if !origin.is_empty() {
            tracing::info!(origin, "Adding allowed origin");
            cors = cors.allowed_origin(origin);
        }
    }
    cors
}
