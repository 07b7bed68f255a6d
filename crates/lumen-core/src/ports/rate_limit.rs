//! Rate limiting port.

use std::time::Duration;

/// Rate limiter trait - abstraction over rate limiting backends.
///
/// All operations are total and never block on I/O. Implementations shared
/// between threads must serialize the read-prune-append step per key so that
/// no more than the configured maximum is admitted within one window.
pub trait RateLimiter: Send + Sync {
    /// Admit or reject one call for `key`, recording it when admitted.
    fn try_request(&self, key: &str) -> bool;

    /// Calls still available to `key` in the current window.
    fn remaining_requests(&self, key: &str) -> u32;

    /// Time until `key` may be admitted again. Zero when it already may.
    fn time_until_reset(&self, key: &str) -> Duration;

    /// Forget every recorded call for `key`.
    fn reset(&self, key: &str);

    /// Forget every recorded call for every key.
    fn reset_all(&self);

    /// Admit or reject one call and report the state right after it.
    fn check(&self, key: &str) -> RateLimitResult;
}

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_after: Duration,
}

/// Rate limit errors.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Invalid rate limit configuration: {0}")]
    InvalidConfig(String),
}
