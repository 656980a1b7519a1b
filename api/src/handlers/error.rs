//! Maps domain and request errors onto HTTP responses
//!
//! Every failure leaves the server as an [`ErrorResponse`] body. Client
//! errors carry their message; server errors are logged and answered with a
//! fixed message so internals never reach the caller.

use std::collections::BTreeMap;

use actix_web::{
    http::{header, StatusCode},
    HttpResponse, ResponseError,
};
use validator::{ValidationErrors, ValidationErrorsKind};

use hotel_core::errors::{AuthError, DomainError, TokenError};
use hotel_shared::{error_codes, ErrorResponse};

/// Message returned for every 500
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error. Please Try Again Later";

/// Error type returned by every handler
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Submitted data is invalid")]
    InvalidInput(#[from] ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("Rate limit exceeded: {limit} requests per window")]
    RateLimited { limit: u32, retry_after_seconds: u64 },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => error_codes::VALIDATION_ERROR,
            ApiError::BadRequest(_) => error_codes::BAD_REQUEST,
            ApiError::RateLimited { .. } => error_codes::RATE_LIMIT_EXCEEDED,
            ApiError::Domain(error) => match error {
                DomainError::Validation { .. } | DomainError::ValidationErr(_) => {
                    error_codes::VALIDATION_ERROR
                }
                DomainError::NotFound { .. } => error_codes::NOT_FOUND,
                DomainError::Unauthorized => error_codes::UNAUTHORIZED,
                DomainError::Persistence { .. } | DomainError::Internal { .. } => {
                    error_codes::INTERNAL_ERROR
                }
                DomainError::Auth(AuthError::UserAlreadyExists) => error_codes::CONFLICT,
                DomainError::Auth(AuthError::InsufficientPermissions) => error_codes::FORBIDDEN,
                DomainError::Auth(_) => error_codes::AUTHENTICATION_FAILED,
                DomainError::Token(TokenError::TokenGenerationFailed) => error_codes::INTERNAL_ERROR,
                DomainError::Token(TokenError::TokenExpired) => error_codes::TOKEN_EXPIRED,
                DomainError::Token(_) => error_codes::TOKEN_INVALID,
            },
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::InvalidInput(errors) => {
                ErrorResponse::new(self.code(), self.to_string())
                    .add_detail("fields", field_messages(errors))
            }
            ApiError::RateLimited {
                retry_after_seconds,
                ..
            } => ErrorResponse::new(self.code(), "Too many requests. Please try again later.")
                .add_detail("retryAfterSeconds", retry_after_seconds),
            ApiError::Domain(DomainError::ValidationErr(error)) => {
                ErrorResponse::new(self.code(), error.to_string())
                    .add_detail("fields", error.field_messages())
            }
            _ if self.status_code().is_server_error() => {
                ErrorResponse::new(self.code(), INTERNAL_ERROR_MESSAGE)
            }
            _ => ErrorResponse::new(self.code(), self.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Domain(error) => match error {
                DomainError::Validation { .. } | DomainError::ValidationErr(_) => {
                    StatusCode::BAD_REQUEST
                }
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
                DomainError::Persistence { .. } | DomainError::Internal { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                DomainError::Auth(AuthError::UserAlreadyExists) => StatusCode::CONFLICT,
                DomainError::Auth(AuthError::InsufficientPermissions) => StatusCode::FORBIDDEN,
                DomainError::Auth(AuthError::AuthenticationFailed | AuthError::UserNotFound) => {
                    StatusCode::UNAUTHORIZED
                }
                DomainError::Token(TokenError::TokenGenerationFailed) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                DomainError::Token(_) => StatusCode::UNAUTHORIZED,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let mut builder = HttpResponse::build(status);
        match self {
            ApiError::RateLimited {
                limit,
                retry_after_seconds,
            } => {
                builder
                    .insert_header((header::RETRY_AFTER, retry_after_seconds.to_string()))
                    .insert_header(("X-Rate-Limit-Limit", limit.to_string()))
                    .insert_header(("X-Rate-Limit-Remaining", "0"))
                    .insert_header(("X-Rate-Limit-Reset", retry_after_seconds.to_string()));
            }
            _ if status == StatusCode::UNAUTHORIZED => {
                builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
            }
            _ => {}
        }
        builder.json(self.body())
    }
}

/// Flattens validator output into `{ "field": ["message", ..] }`
///
/// Field names are reported in camelCase; nested structs and lists produce
/// dotted and indexed paths such as `hotels[0].rating`.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut fields = BTreeMap::new();
    collect_messages(errors, None, &mut fields);
    fields
}

fn collect_messages(
    errors: &ValidationErrors,
    prefix: Option<&str>,
    out: &mut BTreeMap<String, Vec<String>>,
) {
    for (field, kind) in errors.errors() {
        let name = camel_case(field);
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, name),
            None => name,
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                let messages = out.entry(path.clone()).or_default();
                for error in list {
                    let message = match &error.message {
                        Some(message) => message.to_string(),
                        None => format!("The {} field is invalid.", path),
                    };
                    messages.push(message);
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(inner, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_messages(inner, Some(&format!("{}[{}]", path, index)), out);
                }
            }
        }
    }
}

fn camel_case(field: &str) -> String {
    let mut result = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            result.extend(c.to_uppercase());
            upper = false;
        } else {
            result.push(c);
        }
    }
    result
}
