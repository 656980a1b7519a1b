//! Application factory
//!
//! Builds the actix-web application shared by the binary and the
//! integration tests: state, body limits, middleware, routes, Swagger UI
//! and the JSON 404 fallback.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::{JsonPayloadError, QueryPayloadError},
    middleware::Condition,
    web, App, Error, HttpRequest, HttpResponse,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use hotel_shared::{error_codes, ErrorResponse};

use crate::doc::ApiDoc;
use crate::handlers::ApiError;
use crate::middleware::{create_cors, RateLimiter, RequestTrace};
use crate::routes;
use crate::state::AppState;

/// Where the generated OpenAPI document is served
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let config = state.config.clone();
    let rate_limiter = RateLimiter::new(state.rate_limiter.clone(), state.rate_limit_rule());

    App::new()
        .app_data(state)
        .app_data(
            web::JsonConfig::default()
                .limit(config.server.max_payload_size)
                .error_handler(json_error),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error))
        // Last wrapped runs first: trace, then CORS, then rate limiting
        .wrap(Condition::new(config.rate_limit.enabled, rate_limiter))
        .wrap(create_cors(&config.cors))
        .wrap(RequestTrace)
        .configure(routes::configure)
        .service(SwaggerUi::new("/swagger/{_:.*}").url(OPENAPI_PATH, ApiDoc::openapi()))
        .default_service(web::to(not_found))
}

fn json_error(error: JsonPayloadError, _req: &HttpRequest) -> Error {
    ApiError::BadRequest(format!("Malformed request body: {}", error)).into()
}

fn query_error(error: QueryPayloadError, _req: &HttpRequest) -> Error {
    ApiError::BadRequest(format!("Malformed query string: {}", error)).into()
}

/// Default 404 handler
async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        format!("No route for {} {}", req.method(), req.path()),
    ))
}
