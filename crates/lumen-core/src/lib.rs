//! # Lumen Core
//!
//! The domain layer of the Lumen request guards.
//! This crate contains pure logic with zero infrastructure dependencies:
//! the rate limiting port and the PII redaction helpers.

pub mod domain;
pub mod ports;
pub mod redaction;

pub use redaction::{RedactionConfig, Redactor};
