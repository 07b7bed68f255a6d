use serde::{Deserialize, Serialize};

/// Key-name terms redacted when no custom list is configured.
pub const DEFAULT_SENSITIVE_FIELDS: &[&str] = &[
    "email",
    "full_name",
    "name",
    "address",
    "phone",
    "ssn",
    "created_by",
    "account_number",
    "routing_number",
    "card_number",
];

pub const DEFAULT_PLACEHOLDER_PREFIX: &str = "REDACTED_";
pub const DEFAULT_PLACEHOLDER_EMAIL: &str = "user@example.com";
pub const DEFAULT_USER_TOKEN: &str = "User";

/// Redaction configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// Terms matched case-insensitively as substrings of object keys.
    pub sensitive_fields: Vec<String>,
    /// Prefix of the random token substituted for a redacted value.
    pub placeholder_prefix: String,
    /// Replacement for the user's email in prompt text.
    pub placeholder_email: String,
    /// Replacement for the user's name and name-like phrases in prompt text.
    pub user_token: String,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            sensitive_fields: DEFAULT_SENSITIVE_FIELDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            placeholder_prefix: DEFAULT_PLACEHOLDER_PREFIX.to_string(),
            placeholder_email: DEFAULT_PLACEHOLDER_EMAIL.to_string(),
            user_token: DEFAULT_USER_TOKEN.to_string(),
        }
    }
}

impl RedactionConfig {
    /// Extend the sensitive field list. Blank and duplicate terms are ignored.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for field in fields {
            let term = field.as_ref().trim().to_lowercase();
            if !term.is_empty() && !self.sensitive_fields.contains(&term) {
                self.sensitive_fields.push(term);
            }
        }
        self
    }

    /// Lowercase every term and drop blanks so matching only lowercases keys.
    pub(crate) fn normalized(mut self) -> Self {
        let fields = std::mem::take(&mut self.sensitive_fields);
        self.with_fields(fields)
    }
}
