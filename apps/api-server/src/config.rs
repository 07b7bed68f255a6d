//! Application configuration loaded from environment variables.

use std::env;

use lumen_core::RedactionConfig;
use lumen_infra::RateLimitConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub rate_limit: RateLimitConfig,
    pub redaction: RedactionConfig,
    /// Bearer token for the rate limit reset routes. Unset disables them.
    pub admin_token: Option<String>,
    /// Key clients by `Forwarded`/`X-Forwarded-For` instead of the peer
    /// address. Only safe behind a proxy that overwrites those headers.
    pub trust_proxy_headers: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            rate_limit: RateLimitConfig::from_lookup(&lookup),
            redaction: Self::redaction_from(&lookup),
            admin_token: lookup("ADMIN_TOKEN")
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            trust_proxy_headers: lookup("TRUST_PROXY_HEADERS")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    /// Default redaction settings extended by the environment.
    /// Format: PII_EXTRA_FIELDS=<term>,<term>,...
    fn redaction_from<F>(lookup: &F) -> RedactionConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let extra_fields = lookup("PII_EXTRA_FIELDS").unwrap_or_default();
        let mut config = RedactionConfig::default().with_fields(extra_fields.split(','));

        if let Some(prefix) = lookup("PII_PLACEHOLDER_PREFIX").filter(|p| !p.is_empty()) {
            config.placeholder_prefix = prefix;
        }

        config
    }
}
