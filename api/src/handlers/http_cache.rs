//! Cached single-resource responses
//!
//! Bodies are kept in the [`ResponseCache`] under the resource path. Every
//! response carries a content hash `ETag` and private `Cache-Control`; a
//! matching `If-None-Match` is answered with 304.

use std::future::Future;
use std::time::Duration;

use actix_web::{
    http::header::{self, HeaderValue},
    HttpRequest, HttpResponse,
};
use serde::Serialize;
use sha2::{Digest, Sha256};

use hotel_core::services::ResponseCache;

use super::error::{ApiError, ApiResult};

/// Serve `key` from the cache, or run `load`, cache its JSON and serve it
///
/// Cache failures are logged and the request falls through to `load`.
pub async fn respond_cached<T, F, Fut>(
    req: &HttpRequest,
    cache: &dyn ResponseCache,
    key: &str,
    ttl: Duration,
    load: F,
) -> ApiResult<HttpResponse>
where
    T: Serialize,
    F: FnOnce() -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    let cached = match cache.get(key).await {
        Ok(hit) => hit,
        Err(e) => {
            tracing::warn!(error = %e, key, "Response cache read failed");
            None
        }
    };

    let (body, status) = match cached {
        Some(body) => (body, "HIT"),
        None => {
            let value = load().await?;
            let body = serde_json::to_string(&value)
                .map_err(|e| ApiError::Domain(hotel_core::DomainError::internal(e.to_string())))?;
            if let Err(e) = cache.set(key, &body, ttl).await {
                tracing::warn!(error = %e, key, "Response cache write failed");
            }
            (body, "MISS")
        }
    };

    let etag = etag_for(&body);
    let cache_control = format!("private, max-age={}, must-revalidate", ttl.as_secs());

    if if_none_match(req, &etag) {
        return Ok(HttpResponse::NotModified()
            .insert_header((header::ETAG, etag))
            .insert_header((header::CACHE_CONTROL, cache_control))
            .insert_header(("X-Cache", status))
            .finish());
    }

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .insert_header((header::ETAG, etag))
        .insert_header((header::CACHE_CONTROL, cache_control))
        .insert_header(("X-Cache", status))
        .body(body))
}

/// Drop cached entries after a write. Failures are logged, not returned.
pub async fn invalidate(cache: &dyn ResponseCache, keys: &[String]) {
    for key in keys {
        if let Err(e) = cache.invalidate(key).await {
            tracing::warn!(error = %e, key = %key, "Response cache invalidation failed");
        }
    }
}

/// Strong validator over the serialized body
pub fn etag_for(body: &str) -> String {
    format!("\"{}\"", hex::encode(Sha256::digest(body.as_bytes())))
}

fn if_none_match(req: &HttpRequest, etag: &str) -> bool {
    req.headers()
        .get_all(header::IF_NONE_MATCH)
        .filter_map(|value: &HeaderValue| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .any(|candidate| candidate == "*" || candidate.trim_start_matches("W/") == etag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, http::StatusCode, test::TestRequest};
    use hotel_core::services::MemoryResponseCache;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TTL: Duration = Duration::from_secs(120);

    #[actix_web::test]
    async fn test_miss_then_hit() {
        let cache = MemoryResponseCache::new();
        let loads = AtomicUsize::new(0);
        let req = TestRequest::get().uri("/api/country/1").to_http_request();

        for expected in ["MISS", "HIT"] {
            let response = respond_cached(&req, &cache, "/api/country/1", TTL, || async {
                loads.fetch_add(1, Ordering::SeqCst);
                Ok(serde_json::json!({"id": 1, "name": "Jamaica"}))
            })
            .await
            .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.headers().get("X-Cache").unwrap(), expected);
            assert_eq!(
                response.headers().get(header::CACHE_CONTROL).unwrap(),
                "private, max-age=120, must-revalidate"
            );
            let body = to_bytes(response.into_body()).await.unwrap();
            assert_eq!(body, r#"{"id":1,"name":"Jamaica"}"#);
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn test_matching_etag_is_not_modified() {
        let cache = MemoryResponseCache::new();
        let etag = etag_for(r#"{"id":2}"#);

        for header_value in [etag.clone(), format!("W/{}", etag), format!("\"other\", {}", etag)] {
            let req = TestRequest::get()
                .insert_header((header::IF_NONE_MATCH, header_value))
                .to_http_request();
            let response = respond_cached(&req, &cache, "/api/hotel/2", TTL, || async {
                Ok(serde_json::json!({"id": 2}))
            })
            .await
            .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
        }
    }

    #[actix_web::test]
    async fn test_load_error_is_not_cached() {
        let cache = MemoryResponseCache::new();
        let req = TestRequest::get().to_http_request();

        let result = respond_cached::<serde_json::Value, _, _>(&req, &cache, "/api/hotel/9", TTL, || async {
            Err(hotel_core::DomainError::not_found("Hotel 9").into())
        })
        .await;

        assert!(result.is_err());
        assert!(cache.get("/api/hotel/9").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_invalidate_forces_reload() {
        let cache = MemoryResponseCache::new();
        cache.set("/api/country/1", "{}", TTL).await.unwrap();

        invalidate(&cache, &["/api/country/1".to_string(), "/api/hotel/404".to_string()]).await;
        assert!(cache.get("/api/country/1").await.unwrap().is_none());
    }

    #[test]
    fn test_etag_is_quoted_sha256() {
        let etag = etag_for("{}");
        assert_eq!(etag.len(), 66);
        assert!(etag.starts_with('"') && etag.ends_with('"'));
    }
}
