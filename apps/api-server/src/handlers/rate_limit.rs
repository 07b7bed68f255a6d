//! Rate limit inspection and reset endpoints.
//!
//! Resets bypass admission control, so they require the admin bearer token
//! and are refused outright when none is configured.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{HttpRequest, HttpResponse, web};

use lumen_shared::ApiResponse;
use lumen_shared::dto::RateLimitStatusResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn status_for(state: &AppState, key: String) -> RateLimitStatusResponse {
    RateLimitStatusResponse {
        remaining: state.limiter.remaining_requests(&key),
        reset_after_ms: state.limiter.time_until_reset(&key).as_millis() as u64,
        key,
    }
}

fn require_admin(req: &HttpRequest, state: &AppState) -> AppResult<()> {
    let Some(expected) = state.admin_token.as_deref() else {
        return Err(AppError::Unauthorized);
    };

    let presented = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    match presented {
        Some(token) if tokens_match(token.as_bytes(), expected.as_bytes()) => Ok(()),
        _ => {
            tracing::warn!(path = %req.path(), "Rejected rate limit reset without admin token");
            Err(AppError::Unauthorized)
        }
    }
}

/// Length-checked comparison that does not stop at the first differing byte.
fn tokens_match(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// GET /api/rate-limit/{key}
pub async fn status(state: web::Data<AppState>, key: web::Path<String>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(status_for(&state, key.into_inner())))
}

/// DELETE /api/rate-limit/{key}
pub async fn reset(
    req: HttpRequest,
    state: web::Data<AppState>,
    key: web::Path<String>,
) -> AppResult<HttpResponse> {
    require_admin(&req, &state)?;

    let key = key.into_inner();
    state.limiter.reset(&key);
    tracing::info!(key = %key, "Rate limit reset");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        status_for(&state, key),
        "Rate limit reset",
    )))
}

/// DELETE /api/rate-limit
pub async fn reset_all(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    require_admin(&req, &state)?;

    state.limiter.reset_all();
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::App;
    use actix_web::http::StatusCode;
    use actix_web::test::{TestRequest, call_and_read_body_json, call_service, init_service};
    use serde_json::Value;
    use std::sync::Arc;
    use std::time::Duration;

    use lumen_core::Redactor;
    use lumen_infra::{RateLimitConfig, SlidingWindowRateLimiter};

    use crate::middleware::rate_limit::RateLimitMiddleware;

    fn state(max_requests: u32) -> AppState {
        let limiter = SlidingWindowRateLimiter::new(RateLimitConfig {
            max_requests,
            window: Duration::from_secs(60),
        })
        .unwrap();
        AppState::from_parts(Arc::new(limiter), Arc::new(Redactor::default()))
    }

    #[test]
    fn test_tokens_match() {
        assert!(tokens_match(b"s3cret", b"s3cret"));
        assert!(!tokens_match(b"s3cret", b"s3cres"));
        assert!(!tokens_match(b"s3cret", b"s3cret-longer"));
        assert!(!tokens_match(b"", b"s3cret"));
    }

    #[actix_web::test]
    async fn test_status_and_reset() {
        let state = state(2).with_admin_token("s3cret");
        state.limiter.try_request("alice");
        state.limiter.try_request("alice");

        let app = init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(crate::handlers::configure_routes),
        )
        .await;

        let req = TestRequest::get().uri("/api/rate-limit/alice").to_request();
        let body: Value = call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["remaining"], 0);
        assert!(body["data"]["reset_after_ms"].as_u64().unwrap() > 0);

        let req = TestRequest::delete()
            .uri("/api/rate-limit/alice")
            .insert_header(("Authorization", "Bearer s3cret"))
            .to_request();
        let body: Value = call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["remaining"], 2);
        assert_eq!(body["data"]["reset_after_ms"], 0);
        assert_eq!(body["message"], "Rate limit reset");
    }

    #[actix_web::test]
    async fn test_reset_requires_admin_token() {
        let state = state(1).with_admin_token("s3cret");
        state.limiter.try_request("alice");

        let app = init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(crate::handlers::configure_routes),
        )
        .await;

        for auth in [None, Some("Bearer wrong"), Some("s3cret")] {
            let mut req = TestRequest::delete().uri("/api/rate-limit/alice");
            if let Some(auth) = auth {
                req = req.insert_header(("Authorization", auth));
            }
            let resp = call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

            let resp = call_service(&app, TestRequest::delete().uri("/api/rate-limit").to_request())
                .await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        }

        assert_eq!(state.limiter.remaining_requests("alice"), 0);
    }

    #[actix_web::test]
    async fn test_reset_disabled_without_configured_token() {
        let state = state(1);
        let app = init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::handlers::configure_routes),
        )
        .await;

        let req = TestRequest::delete()
            .uri("/api/rate-limit")
            .insert_header(("Authorization", "Bearer "))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_anonymous_resets_cannot_lift_the_limit() {
        let state = state(2).with_admin_token("s3cret");
        let app = init_service(
            App::new()
                .wrap(RateLimitMiddleware::new(state.limiter.clone()))
                .app_data(web::Data::new(state))
                .configure(crate::handlers::configure_routes),
        )
        .await;

        let mut admitted = 0;
        for _ in 0..20 {
            let resp = call_service(&app, TestRequest::get().uri("/api/health").to_request()).await;
            if resp.status() == StatusCode::OK {
                admitted += 1;
            }

            let resp =
                call_service(&app, TestRequest::delete().uri("/api/rate-limit").to_request()).await;
            assert_ne!(resp.status(), StatusCode::NO_CONTENT);
        }

        assert!(admitted <= 2, "admitted {admitted} requests with max_requests=2");
    }
}
