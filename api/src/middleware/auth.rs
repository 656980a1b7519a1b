//! JWT authentication middleware for protecting API endpoints.
//!
//! The middleware extracts the bearer token from the `Authorization` header,
//! verifies it with the [`TokenService`](hotel_core::services::TokenService)
//! held in [`AppState`], optionally checks a required role, and injects an
//! [`AuthContext`] into the request.
//!
//! Wrap individual routes rather than whole scopes so reads stay public:
//!
//! ```ignore
//! web::resource("/{id}")
//!     .route(web::get().to(get_country))
//!     .route(web::delete().to(delete_country).wrap(JwtAuth::require_role(role::ADMINISTRATOR)))
//! ```

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use uuid::Uuid;

use hotel_core::domain::Claims;
use hotel_core::errors::{AuthError, DomainError, TokenError};

use crate::handlers::ApiError;
use crate::state::AppState;

/// Caller identity injected into authenticated requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
    /// Email the token was issued to
    pub email: String,
    pub roles: Vec<String>,
    /// JWT ID for tracking
    pub jti: String,
}

impl AuthContext {
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidTokenFormat))?;
        Ok(Self {
            user_id,
            email: claims.sub,
            roles: claims.roles,
            jti: claims.jti,
        })
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Default)]
pub struct JwtAuth {
    required_role: Option<&'static str>,
}

impl JwtAuth {
    /// Any valid access token
    pub fn authenticated() -> Self {
        Self::default()
    }

    /// A valid access token carrying `role`
    pub fn require_role(role: &'static str) -> Self {
        Self {
            required_role: Some(role),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            required_role: self.required_role,
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    required_role: Option<&'static str>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let required_role = self.required_role;

        Box::pin(async move {
            match authorize(&req, required_role) {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(error) => {
                    let response = error.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

fn authorize(req: &ServiceRequest, required_role: Option<&str>) -> Result<AuthContext, ApiError> {
    let token = extract_bearer_token(req).ok_or(DomainError::Unauthorized)?;

    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| DomainError::internal("Application state is not registered"))?;

    let claims = state.auth.token_service().verify_access_token(&token)?;
    let context = AuthContext::from_claims(claims)?;

    if let Some(role) = required_role {
        if !context.has_role(role) {
            tracing::info!(user_id = %context.user_id, role, "Missing required role");
            return Err(DomainError::from(AuthError::InsufficientPermissions).into());
        }
    }
    Ok(context)
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App, HttpResponse};
    use hotel_core::domain::entities::role;
    use hotel_core::services::RegisterUser;
    use hotel_shared::AppConfig;

    #[actix_web::test]
    async fn test_extract_bearer_token() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_empty = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    fn state() -> AppState {
        let mut config = AppConfig::development();
        config.jwt.secret = "middleware-test-signing-key-of-sufficient-length".to_string();
        config.password.bcrypt_cost = 4;
        AppState::in_memory(config).unwrap()
    }

    async fn token_for(state: &AppState, email: &str, roles: &[&str]) -> String {
        state
            .auth
            .register(RegisterUser {
                email: email.to_string(),
                password: "P@ssw0rd1".to_string(),
                first_name: None,
                last_name: None,
                phone_number: None,
                roles: roles.iter().map(|r| r.to_string()).collect(),
            })
            .await
            .unwrap();
        state.auth.login(email, "P@ssw0rd1").await.unwrap().access_token
    }

    async fn whoami(ctx: AuthContext) -> HttpResponse {
        HttpResponse::Ok().body(ctx.email)
    }

    #[actix_web::test]
    async fn test_role_enforcement() {
        let state = state();
        let admin = token_for(&state, "admin@hotels.test", &[role::ADMINISTRATOR]).await;
        let user = token_for(&state, "user@hotels.test", &[role::USER]).await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .route("/me", web::get().to(whoami).wrap(JwtAuth::authenticated()))
                .route(
                    "/admin",
                    web::get().to(whoami).wrap(JwtAuth::require_role(role::ADMINISTRATOR)),
                ),
        )
        .await;

        let call = |path: &'static str, token: Option<String>| {
            let mut req = test::TestRequest::get().uri(path);
            if let Some(token) = token {
                req = req.insert_header((AUTHORIZATION, format!("Bearer {}", token)));
            }
            req.to_request()
        };

        let res = test::call_service(&app, call("/me", None)).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = test::call_service(&app, call("/me", Some("garbage".into()))).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = test::call_service(&app, call("/me", Some(user.clone()))).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "user@hotels.test");

        let res = test::call_service(&app, call("/admin", Some(user))).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let res = test::call_service(&app, call("/admin", Some(admin))).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
