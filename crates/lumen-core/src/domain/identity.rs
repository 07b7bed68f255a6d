use serde::{Deserialize, Serialize};

/// Identity of the user a prompt is written on behalf of.
///
/// Only the fields that are scrubbed from outgoing prompt text are carried.
/// The accessors trim surrounding whitespace, so `" Jane Doe "` scrubs
/// `Jane Doe` wherever it appears. Whitespace-only fields are absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptIdentity {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl PromptIdentity {
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            full_name: Some(full_name.into()),
            email: Some(email.into()),
        }
    }

    /// Display name, if present and not blank.
    pub fn full_name(&self) -> Option<&str> {
        non_blank(self.full_name.as_deref())
    }

    /// Email address, if present and not blank.
    pub fn email(&self) -> Option<&str> {
        non_blank(self.email.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
