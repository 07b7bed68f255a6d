//! # Lumen Infrastructure
//!
//! Concrete implementations of the ports defined in `lumen-core`.
//! State held here is per-process: restarting the process clears it.

pub mod rate_limit;

pub use rate_limit::{RateLimitConfig, SlidingWindowRateLimiter};
