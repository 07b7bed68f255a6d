//! In-memory sliding window rate limiter.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use lumen_core::ports::{RateLimitError, RateLimitResult, RateLimiter};

/// In-memory rate limiter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from a variable lookup, keeping defaults for missing or
    /// unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            max_requests: lookup("RATE_LIMIT_MAX_REQUESTS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.max_requests),
            window: lookup("RATE_LIMIT_WINDOW_MS")
                .and_then(|s| s.trim().parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.window),
        }
    }

    pub fn validate(&self) -> Result<(), RateLimitError> {
        if self.max_requests == 0 {
            return Err(RateLimitError::InvalidConfig(
                "max_requests must be positive".to_string(),
            ));
        }
        if self.window.is_zero() {
            return Err(RateLimitError::InvalidConfig(
                "window must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-key sliding window limiter.
///
/// Each key keeps the instants of its admitted requests. Entries older than
/// the window are pruned lazily on access; keys are only dropped by
/// [`RateLimiter::reset`] and [`RateLimiter::reset_all`].
///
/// Admission for a key runs under that key's shard write lock, so concurrent
/// callers never admit more than `max_requests` within one window.
pub struct SlidingWindowRateLimiter {
    requests: DashMap<String, VecDeque<Instant>>,
    config: RateLimitConfig,
}

impl SlidingWindowRateLimiter {
    pub fn new(config: RateLimitConfig) -> Result<Self, RateLimitError> {
        config.validate()?;

        tracing::debug!(
            max_requests = config.max_requests,
            window_ms = config.window.as_millis() as u64,
            "Sliding window rate limiter created"
        );

        Ok(Self {
            requests: DashMap::new(),
            config,
        })
    }

    pub fn from_env() -> Result<Self, RateLimitError> {
        Self::new(RateLimitConfig::from_env())
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Number of keys currently holding state.
    pub fn tracked_keys(&self) -> usize {
        self.requests.len()
    }

    fn is_live(&self, at: Instant, now: Instant) -> bool {
        now.saturating_duration_since(at) < self.config.window
    }

    fn prune(&self, timestamps: &mut VecDeque<Instant>, now: Instant) {
        timestamps.retain(|&at| self.is_live(at, now));
    }

    fn live_count(&self, timestamps: &VecDeque<Instant>, now: Instant) -> usize {
        timestamps.iter().filter(|&&at| self.is_live(at, now)).count()
    }

    fn remaining_for(&self, live: usize) -> u32 {
        let live = u32::try_from(live).unwrap_or(u32::MAX);
        self.config.max_requests.saturating_sub(live)
    }

    fn reset_after_for(&self, timestamps: &VecDeque<Instant>, now: Instant) -> Duration {
        if self.live_count(timestamps, now) < self.config.max_requests as usize {
            return Duration::ZERO;
        }

        timestamps
            .iter()
            .copied()
            .filter(|&at| self.is_live(at, now))
            .min()
            .map(|oldest| {
                self.config
                    .window
                    .saturating_sub(now.saturating_duration_since(oldest))
            })
            .unwrap_or(Duration::ZERO)
    }

    pub(crate) fn try_request_at(&self, key: &str, now: Instant) -> bool {
        self.check_at(key, now).allowed
    }

    pub(crate) fn check_at(&self, key: &str, now: Instant) -> RateLimitResult {
        let mut timestamps = self.requests.entry(key.to_string()).or_default();
        self.prune(&mut timestamps, now);

        let allowed = timestamps.len() < self.config.max_requests as usize;
        if allowed {
            timestamps.push_back(now);
        }

        let result = RateLimitResult {
            allowed,
            remaining: self.remaining_for(timestamps.len()),
            reset_after: self.reset_after_for(&timestamps, now),
        };

        if !allowed {
            tracing::debug!(
                key = %key,
                retry_after_ms = result.reset_after.as_millis() as u64,
                "Rate limit exceeded"
            );
        }

        result
    }

    pub(crate) fn remaining_requests_at(&self, key: &str, now: Instant) -> u32 {
        let live = self
            .requests
            .get(key)
            .map(|timestamps| self.live_count(&timestamps, now))
            .unwrap_or(0);
        self.remaining_for(live)
    }

    pub(crate) fn time_until_reset_at(&self, key: &str, now: Instant) -> Duration {
        self.requests
            .get(key)
            .map(|timestamps| self.reset_after_for(&timestamps, now))
            .unwrap_or(Duration::ZERO)
    }
}

impl RateLimiter for SlidingWindowRateLimiter {
    fn try_request(&self, key: &str) -> bool {
        self.try_request_at(key, Instant::now())
    }

    fn remaining_requests(&self, key: &str) -> u32 {
        self.remaining_requests_at(key, Instant::now())
    }

    fn time_until_reset(&self, key: &str) -> Duration {
        self.time_until_reset_at(key, Instant::now())
    }

    fn reset(&self, key: &str) {
        self.requests.remove(key);
    }

    fn reset_all(&self) {
        let cleared = self.requests.len();
        self.requests.clear();
        tracing::info!(cleared_keys = cleared, "Rate limiter state cleared");
    }

    fn check(&self, key: &str) -> RateLimitResult {
        self.check_at(key, Instant::now())
    }
}
