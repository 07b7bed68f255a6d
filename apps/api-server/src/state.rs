//! Application state - shared across all handlers.

use std::sync::Arc;

use lumen_core::Redactor;
use lumen_core::ports::{RateLimitError, RateLimiter};
use lumen_infra::SlidingWindowRateLimiter;

use crate::config::AppConfig;

/// Shared application state.
///
/// The limiter and redactor are built once here and handed out by reference.
#[derive(Clone)]
pub struct AppState {
    pub limiter: Arc<dyn RateLimiter>,
    pub redactor: Arc<Redactor>,
    /// Required bearer token for rate limit resets; `None` disables them.
    pub admin_token: Option<Arc<str>>,
}

impl AppState {
    /// Build the application state from configuration.
    pub fn new(config: &AppConfig) -> Result<Self, RateLimitError> {
        let limiter = SlidingWindowRateLimiter::new(config.rate_limit.clone())?;
        let redactor = Redactor::new(config.redaction.clone());

        tracing::info!(
            max_requests = config.rate_limit.max_requests,
            window_ms = config.rate_limit.window.as_millis() as u64,
            sensitive_fields = redactor.config().sensitive_fields.len(),
            admin_routes = config.admin_token.is_some(),
            "Application state initialized"
        );

        let state = Self::from_parts(Arc::new(limiter), Arc::new(redactor));
        Ok(match &config.admin_token {
            Some(token) => state.with_admin_token(token.as_str()),
            None => state,
        })
    }

    pub fn from_parts(limiter: Arc<dyn RateLimiter>, redactor: Arc<Redactor>) -> Self {
        Self {
            limiter,
            redactor,
            admin_token: None,
        }
    }

    pub fn with_admin_token(mut self, token: &str) -> Self {
        self.admin_token = Some(Arc::from(token));
        self
    }
}
