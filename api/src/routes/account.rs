//! Account endpoints under `/api/account`

use actix_web::{web, HttpResponse};
use validator::Validate;

use hotel_core::errors::DomainError;

use crate::dto::{ErrorBody, LoginUserDto, TokenRequestDto, UserDto};
use crate::handlers::ApiResult;
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/account")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/refreshtoken", web::post().to(refresh_token)),
    );
}

/// Register a user with the requested roles
#[utoipa::path(
    post,
    path = "/api/account/register",
    tag = "account",
    request_body = UserDto,
    responses(
        (status = 202, description = "Registered"),
        (status = 400, description = "Invalid data, weak password or unknown role", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody)
    )
)]
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<UserDto>,
) -> ApiResult<HttpResponse> {
    let dto = body.into_inner();
    tracing::info!(email = %dto.email, "Registration attempt");
    dto.validate()?;

    let user = state.auth.register(dto.into()).await?;
    tracing::info!(user_id = %user.id, "User registered");
    Ok(HttpResponse::Accepted().finish())
}

/// Exchange credentials for an access and refresh token
#[utoipa::path(
    post,
    path = "/api/account/login",
    tag = "account",
    request_body = LoginUserDto,
    responses(
        (status = 202, description = "Tokens issued", body = TokenRequestDto),
        (status = 400, description = "Submitted data is invalid", body = ErrorBody),
        (status = 401, description = "Bad credentials", body = ErrorBody)
    )
)]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginUserDto>,
) -> ApiResult<HttpResponse> {
    let dto = body.into_inner();
    tracing::info!(email = %dto.email, "Login attempt");
    dto.validate()?;

    let pair = state.auth.login(&dto.email, &dto.password).await?;
    Ok(HttpResponse::Accepted().json(TokenRequestDto::from(pair)))
}

/// Rotate a token pair
///
/// The refresh token is single use; presenting it again fails.
#[utoipa::path(
    post,
    path = "/api/account/refreshtoken",
    tag = "account",
    request_body = TokenRequestDto,
    responses(
        (status = 200, description = "New token pair", body = TokenRequestDto),
        (status = 401, description = "Token pair rejected", body = ErrorBody)
    )
)]
pub async fn refresh_token(
    state: web::Data<AppState>,
    body: web::Json<TokenRequestDto>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner();
    let pair = state
        .auth
        .refresh(&request.token, &request.refresh_token)
        .await
        .map_err(|e| {
            if e.is_client_error() {
                tracing::info!(reason = %e, "Token refresh rejected");
                DomainError::Unauthorized
            } else {
                e
            }
        })?;
    Ok(HttpResponse::Ok().json(TokenRequestDto::from(pair)))
}
