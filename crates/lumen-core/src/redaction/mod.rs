//! PII redaction helpers.
//!
//! These are best-effort heuristics applied before data crosses a logging or
//! third-party boundary. They match key names and literal identity strings
//! only, so they can both over- and under-redact. They are not an
//! anonymization guarantee.

mod config;

use std::sync::LazyLock;

use regex::{NoExpand, Regex, RegexBuilder};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::PromptIdentity;

pub use config::{
    DEFAULT_PLACEHOLDER_EMAIL, DEFAULT_PLACEHOLDER_PREFIX, DEFAULT_SENSITIVE_FIELDS,
    DEFAULT_USER_TOKEN, RedactionConfig,
};

/// Two consecutive capitalized words, e.g. "Jane Doe".
/// Not locale aware: misses single-word and non-Latin names.
static PROPER_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-z]+ [A-Z][a-z]+\b").expect("proper name pattern is valid")
});

const PLACEHOLDER_SUFFIX_LEN: usize = 12;

/// Redacts sensitive values from JSON documents and prompt text.
#[derive(Debug, Clone)]
pub struct Redactor {
    config: RedactionConfig,
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new(RedactionConfig::default())
    }
}

impl Redactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self {
            config: config.normalized(),
        }
    }

    pub fn config(&self) -> &RedactionConfig {
        &self.config
    }

    /// Whether values under `key` are redacted.
    pub fn is_sensitive_key(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.config
            .sensitive_fields
            .iter()
            .any(|term| key.contains(term.as_str()))
    }

    /// A fresh opaque token. Two calls never share a token in practice.
    pub fn placeholder(&self) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!(
            "{}{}",
            self.config.placeholder_prefix,
            &suffix[..PLACEHOLDER_SUFFIX_LEN]
        )
    }

    /// Return a copy of `value` with every value under a sensitive key
    /// replaced by a placeholder.
    ///
    /// Arrays are processed element-wise and objects key by key. A top-level
    /// scalar has no key and is returned unchanged.
    pub fn sanitize_structure(&self, value: &Value) -> Value {
        match value {
            Value::Array(items) => {
                Value::Array(items.iter().map(|v| self.sanitize_structure(v)).collect())
            }
            Value::Object(map) => Value::Object(self.sanitize_object(map)),
            scalar => scalar.clone(),
        }
    }

    fn sanitize_object(&self, map: &Map<String, Value>) -> Map<String, Value> {
        map.iter()
            .map(|(key, value)| {
                let value = if self.is_sensitive_key(key) {
                    Value::String(self.placeholder())
                } else {
                    self.sanitize_structure(value)
                };
                (key.clone(), value)
            })
            .collect()
    }

    /// Scrub the user's name and email, then anything that looks like a
    /// proper name, from free text bound for an external model.
    ///
    /// Returns `None` without a prompt, and the prompt unchanged without an
    /// identity.
    pub fn sanitize_prompt_text(
        &self,
        prompt: Option<&str>,
        identity: Option<&PromptIdentity>,
    ) -> Option<String> {
        let prompt = prompt?;
        let Some(identity) = identity else {
            return Some(prompt.to_string());
        };

        let mut text = prompt.to_string();
        if let Some(name) = identity.full_name() {
            text = replace_ignore_case(&text, name, &self.config.user_token);
        }
        if let Some(email) = identity.email() {
            text = replace_ignore_case(&text, email, &self.config.placeholder_email);
        }

        Some(
            PROPER_NAME
                .replace_all(&text, NoExpand(&self.config.user_token))
                .into_owned(),
        )
    }
}

/// Redact with the default field list.
pub fn sanitize_structure(value: &Value) -> Value {
    Redactor::default().sanitize_structure(value)
}

/// Scrub prompt text with the default tokens.
pub fn sanitize_prompt_text(
    prompt: Option<&str>,
    identity: Option<&PromptIdentity>,
) -> Option<String> {
    Redactor::default().sanitize_prompt_text(prompt, identity)
}

fn replace_ignore_case(text: &str, needle: &str, replacement: &str) -> String {
    match RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern.replace_all(text, NoExpand(replacement)).into_owned(),
        // Only reachable when the needle exceeds the regex size limit.
        Err(_) => text.replace(needle, replacement),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn is_placeholder(value: &Value) -> bool {
        value
            .as_str()
            .map(|s| {
                s.len() == DEFAULT_PLACEHOLDER_PREFIX.len() + PLACEHOLDER_SUFFIX_LEN
                    && s.starts_with(DEFAULT_PLACEHOLDER_PREFIX)
            })
            .unwrap_or(false)
    }

    #[test]
    fn test_sanitize_structure_redacts_sensitive_keys() {
        let input = json!({
            "email": "a@b.com",
            "nested": { "full_name": "Jane Doe" },
            "note": "hello"
        });

        let output = sanitize_structure(&input);

        assert!(is_placeholder(&output["email"]));
        assert!(is_placeholder(&output["nested"]["full_name"]));
        assert_ne!(output["email"], output["nested"]["full_name"]);
        assert_eq!(output["note"], "hello");
    }

    #[test]
    fn test_sanitize_structure_arrays_element_wise() {
        let input = json!([
            { "email": "a@b.com", "amount": 10 },
            { "email": "c@d.com", "amount": 20 },
            "plain"
        ]);

        let output = sanitize_structure(&input);
        let items = output.as_array().unwrap();

        assert_eq!(items.len(), 3);
        assert!(is_placeholder(&items[0]["email"]));
        assert_eq!(items[0]["amount"], 10);
        assert_eq!(items[1]["amount"], 20);
        assert_eq!(items[2], "plain");
    }

    #[test]
    fn test_sanitize_structure_arrays_under_plain_keys() {
        let input = json!({ "members": [{ "phone": "555-0100" }] });
        let output = sanitize_structure(&input);
        assert!(is_placeholder(&output["members"][0]["phone"]));
    }

    #[test]
    fn test_sanitize_structure_key_match_is_substring_and_case_insensitive() {
        let redactor = Redactor::default();
        assert!(redactor.is_sensitive_key("User_Email"));
        assert!(redactor.is_sensitive_key("billingAddress"));
        assert!(redactor.is_sensitive_key("Full_Name"));
        assert!(!redactor.is_sensitive_key("amount"));
    }

    #[test]
    fn test_sanitize_structure_replaces_whole_sensitive_subtree() {
        let input = json!({ "address": { "street": "1 Main St", "zip": "12345" } });
        let output = sanitize_structure(&input);
        assert!(is_placeholder(&output["address"]));
    }

    #[test]
    fn test_sanitize_structure_scalars_pass_through() {
        assert_eq!(sanitize_structure(&json!("jane@doe.com")), json!("jane@doe.com"));
        assert_eq!(sanitize_structure(&json!(42)), json!(42));
        assert_eq!(sanitize_structure(&Value::Null), Value::Null);
    }

    #[test]
    fn test_sanitize_structure_is_not_deterministic() {
        let input = json!({ "ssn": "123-45-6789" });
        let first = sanitize_structure(&input);
        let second = sanitize_structure(&input);
        assert_ne!(first["ssn"], second["ssn"]);
    }

    #[test]
    fn test_extra_fields_are_redacted() {
        let redactor = Redactor::new(RedactionConfig::default().with_fields(["iban"]));
        let output = redactor.sanitize_structure(&json!({ "IBAN": "DE00", "memo": "rent" }));
        assert!(is_placeholder(&output["IBAN"]));
        assert_eq!(output["memo"], "rent");
    }

    #[test]
    fn test_custom_prefix() {
        let redactor = Redactor::new(RedactionConfig {
            placeholder_prefix: "pii-".to_string(),
            ..RedactionConfig::default()
        });
        let output = redactor.sanitize_structure(&json!({ "phone": "555" }));
        assert!(output["phone"].as_str().unwrap().starts_with("pii-"));
    }

    #[test]
    fn test_sanitize_prompt_text_removes_identity() {
        let identity = PromptIdentity::new("Jane Doe", "jane@doe.com");
        let output =
            sanitize_prompt_text(Some("Contact Jane Doe at jane@doe.com"), Some(&identity)).unwrap();

        assert!(!output.contains("Jane Doe"));
        assert!(!output.contains("jane@doe.com"));
        assert!(output.contains(DEFAULT_PLACEHOLDER_EMAIL));
    }

    #[test]
    fn test_sanitize_prompt_text_ignores_case() {
        let identity = PromptIdentity::new("Jane Doe", "Jane@Doe.com");
        let output =
            sanitize_prompt_text(Some("ping JANE DOE or jane@doe.COM"), Some(&identity)).unwrap();
        assert_eq!(output, "ping User or user@example.com");
    }

    #[test]
    fn test_sanitize_prompt_text_trims_identity() {
        let identity = PromptIdentity::new("  jane doe ", " jane@doe.com\n");
        let output =
            sanitize_prompt_text(Some("ask jane doe via jane@doe.com"), Some(&identity)).unwrap();
        assert_eq!(output, "ask User via user@example.com");
    }

    #[test]
    fn test_sanitize_prompt_text_generic_names() {
        let identity = PromptIdentity::default();
        let output =
            sanitize_prompt_text(Some("lunch with Maria Lopez today"), Some(&identity)).unwrap();
        assert_eq!(output, "lunch with User today");
    }

    #[test]
    fn test_sanitize_prompt_text_escapes_identity() {
        let identity = PromptIdentity::new("a.b (c)", "x+y@z.io");
        let prompt = "a.b (c) wrote to x+y@z.io; aXb (c) did not";
        let output = sanitize_prompt_text(Some(prompt), Some(&identity)).unwrap();
        assert_eq!(output, "User wrote to user@example.com; aXb (c) did not");
    }

    #[test]
    fn test_sanitize_prompt_text_missing_arguments() {
        let identity = PromptIdentity::new("Jane Doe", "jane@doe.com");
        assert_eq!(sanitize_prompt_text(None, Some(&identity)), None);
        assert_eq!(
            sanitize_prompt_text(Some("Jane Doe"), None),
            Some("Jane Doe".to_string())
        );
    }
}
