//! HTTP handlers and route configuration.

mod health;
mod privacy;
mod rate_limit;

use actix_web::web;

use crate::middleware::error::AppError;

/// Largest JSON body accepted by the privacy endpoints.
const JSON_LIMIT_BYTES: usize = 256 * 1024;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT_BYTES)
            .error_handler(|err, _req| AppError::from(err).into()),
    )
    .service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/privacy")
                    .route("/sanitize", web::post().to(privacy::sanitize_structure))
                    .route("/prompt", web::post().to(privacy::sanitize_prompt)),
            )
            .service(
                web::scope("/rate-limit")
                    .route("", web::delete().to(rate_limit::reset_all))
                    .route("/{key}", web::get().to(rate_limit::status))
                    .route("/{key}", web::delete().to(rate_limit::reset)),
            ),
    );
}
