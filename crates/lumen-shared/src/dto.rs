//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identity whose name and email are scrubbed from a prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityPayload {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Request to scrub a free-text prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizePromptRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub identity: Option<IdentityPayload>,
}

/// Scrubbed prompt text. `None` when no prompt was supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizePromptResponse {
    pub prompt: Option<String>,
}

/// Redacted JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizeStructureResponse {
    pub document: Value,
}

/// Current rate limit state for a key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitStatusResponse {
    pub key: String,
    pub remaining: u32,
    pub reset_after_ms: u64,
}
