//! Rate limiting middleware for API endpoints
//!
//! Counts requests per client IP in fixed windows through a
//! [`RateLimitStore`], so the limit holds across workers when the store is
//! Redis. Every response reports the budget in `X-Rate-Limit-*` headers;
//! over-limit requests are answered with 429 and `Retry-After`.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    Error, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use hotel_core::services::{RateLimitRule, RateLimitStatus, RateLimitStore};

use crate::handlers::ApiError;

/// Rate limiter middleware factory
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    rule: RateLimitRule,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>, rule: RateLimitRule) -> Self {
        Self { store, rule }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimiterMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterMiddleware {
            service: Rc::new(service),
            store: self.store.clone(),
            rule: self.rule,
        }))
    }
}

/// Rate limiter middleware service
pub struct RateLimiterMiddleware<S> {
    service: Rc<S>,
    store: Arc<dyn RateLimitStore>,
    rule: RateLimitRule,
}

impl<S, B> Service<ServiceRequest> for RateLimiterMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let store = self.store.clone();
        let rule = self.rule;

        Box::pin(async move {
            let ip = client_ip(&req);
            let key = format!("ip:{}", ip);

            let status = match store.hit(&key, &rule).await {
                Ok(status) => Some(status),
                Err(e) => {
                    // Counter backend down: let the request through
                    tracing::warn!(error = %e, client_ip = %ip, "Rate limit check failed");
                    None
                }
            };

            match status {
                Some(RateLimitStatus::Exceeded {
                    limit,
                    retry_after_seconds,
                }) => {
                    tracing::warn!(
                        client_ip = %ip,
                        path = %req.path(),
                        retry_after_seconds,
                        "Rate limit exceeded"
                    );
                    let response = ApiError::RateLimited {
                        limit,
                        retry_after_seconds,
                    }
                    .error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
                Some(RateLimitStatus::Ok {
                    limit,
                    remaining,
                    reset_seconds,
                }) => {
                    let mut res = service.call(req).await?;
                    let headers = res.headers_mut();
                    for (name, value) in [
                        ("x-rate-limit-limit", u64::from(limit)),
                        ("x-rate-limit-remaining", u64::from(remaining)),
                        ("x-rate-limit-reset", reset_seconds),
                    ] {
                        headers.insert(HeaderName::from_static(name), HeaderValue::from(value));
                    }
                    Ok(res.map_into_left_body())
                }
                None => service.call(req).await.map(ServiceResponse::map_into_left_body),
            }
        })
    }
}

/// Client address: first `X-Forwarded-For` hop, then `X-Real-IP`, then the peer
pub fn client_ip(req: &ServiceRequest) -> String {
    let forwarded = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let real_ip = || {
        req.headers()
            .get("X-Real-IP")
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    forwarded
        .or_else(real_ip)
        .map(String::from)
        .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}
