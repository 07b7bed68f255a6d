//! # Lumen Guard Server
//!
//! Actix-web host for the rate limiter and PII redaction helpers.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use middleware::rate_limit::RateLimitMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Lumen guard server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).map_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    if config.trust_proxy_headers {
        tracing::warn!("Rate limiting keys on forwarding headers; a trusted proxy must set them");
    }
    let trust_proxy_headers = config.trust_proxy_headers;

    HttpServer::new(move || {
        App::new()
            .wrap(
                RateLimitMiddleware::new(state.limiter.clone())
                    .trust_proxy_headers(trust_proxy_headers),
            )
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
