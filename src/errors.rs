use std::fmt::Display;

use thiserror::Error;

use crate::redact::is_sensitive;

/// Reasons a single environment value can be rejected.
///
/// The `Display` output of each variant is the reason text that appears after
/// the key in an [`EnvErrors`] report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The value was not one of the two boolean literals.
    #[error("must be \"true\" or \"false\"")]
    Bool,

    /// The value was not a base-10 signed integer that fits the field.
    #[error("must be an int")]
    Int,

    /// The value was not a base-10 integer at all.
    #[error("must be a uint{bits}")]
    Uint { bits: u32 },

    /// The value parsed but was below the field's lower bound.
    #[error("has a min value of {min}")]
    BelowMin { min: u64 },

    /// The value parsed but was above the field's upper bound.
    #[error("has a max value of {max}")]
    AboveMax { max: u64 },

    /// One element of a comma-separated integer list was invalid.
    #[error("must be a comma-separated list of ints: index {index} is invalid")]
    IntList { index: usize },

    /// The value was not a base-10 arbitrary-precision integer.
    #[error("must be a base-10 big.Int")]
    BigInt,

    /// The environment store held a value that is not valid Unicode.
    #[error("must be valid UTF-8")]
    NotUnicode,

    /// Reason supplied by a registered terminal type.
    #[error("{0}")]
    Custom(String),
}

/// One key's accumulated failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidKey {
    key: String,
    message: String,
    raw: Option<String>,
}

impl InvalidKey {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Raw environment value captured when the failure was first recorded.
    ///
    /// Always `None` for sensitive keys.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

/// Every invalid environment variable found while acting on a record.
///
/// Entries are kept in the order their keys first failed, so the rendered
/// report is deterministic. A key that fails more than once keeps a single
/// entry whose messages are joined with `": "`, earliest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", render_report(.entries))]
pub struct EnvErrors {
    entries: Vec<InvalidKey>,
}

impl EnvErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` under `key`, appending to any message already there.
    ///
    /// `raw` is only kept for the first failure of a key, and never for a
    /// sensitive key.
    pub fn push(&mut self, key: &str, message: impl Display, raw: Option<String>) {
        if let Some(existing) = self.entries.iter_mut().find(|entry| entry.key == key) {
            existing.message = format!("{}: {}", existing.message, message);
            if existing.raw.is_none() && !is_sensitive(key) {
                existing.raw = raw;
            }
            return;
        }

        self.entries.push(InvalidKey {
            key: key.to_string(),
            message: message.to_string(),
            raw: raw.filter(|_| !is_sensitive(key)),
        });
    }

    /// Accumulated message for `key`, if it failed.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.message.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| entry.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &InvalidKey> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn render_report(entries: &[InvalidKey]) -> String {
    let mut report = String::from("Errors occurred while acting on the struct:\n");
    for entry in entries {
        if is_sensitive(&entry.key) {
            report.push_str(&format!("  {} {}\n", entry.key, entry.message));
        } else {
            report.push_str(&format!(
                "  {} {}: got \"{}\"\n",
                entry.key,
                entry.message,
                entry.raw.as_deref().unwrap_or_default()
            ));
        }
    }
    report
}

/// Merges one failure into an existing aggregate, creating it when there is none.
pub fn merge(
    existing: Option<EnvErrors>,
    key: &str,
    message: impl Display,
    raw: Option<String>,
) -> EnvErrors {
    let mut errors = existing.unwrap_or_default();
    errors.push(key, message, raw);
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_text() {
        assert_eq!(ParseError::Bool.to_string(), r#"must be "true" or "false""#);
        assert_eq!(ParseError::Uint { bits: 16 }.to_string(), "must be a uint16");
        assert_eq!(
            ParseError::AboveMax { max: 255 }.to_string(),
            "has a max value of 255"
        );
        assert_eq!(
            ParseError::IntList { index: 1 }.to_string(),
            "must be a comma-separated list of ints: index 1 is invalid"
        );
    }

    #[test]
    fn test_merge_creates_aggregate() {
        let errors = merge(None, "MY_INT", ParseError::Int, Some("foo".to_string()));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("MY_INT"), Some("must be an int"));
    }

    #[test]
    fn test_merge_keeps_first_message_first() {
        let errors = merge(None, "MY_INT", ParseError::Int, Some("foo".to_string()));
        let errors = merge(Some(errors), "MY_INT", "must be positive", None);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("MY_INT"), Some("must be an int: must be positive"));
        assert!(errors
            .to_string()
            .contains(r#"MY_INT must be an int: must be positive: got "foo""#));
    }

    #[test]
    fn test_report_format() {
        let mut errors = EnvErrors::new();
        errors.push("MY_BOOLEAN", ParseError::Bool, Some("3".to_string()));
        errors.push("MY_UINT_8", ParseError::Uint { bits: 8 }, Some("a".to_string()));

        assert_eq!(
            errors.to_string(),
            "Errors occurred while acting on the struct:\n  \
             MY_BOOLEAN must be \"true\" or \"false\": got \"3\"\n  \
             MY_UINT_8 must be a uint8: got \"a\"\n"
        );
    }

    #[test]
    fn test_sensitive_raw_is_never_kept() {
        let mut errors = EnvErrors::new();
        errors.push("MY_DB_PassWord", "is invalid", Some("secret".to_string()));

        let entry = errors.iter().next().unwrap();
        assert_eq!(entry.raw(), None);

        let rendered = errors.to_string();
        assert!(rendered.contains("  MY_DB_PassWord is invalid\n"));
        assert!(!rendered.contains("secret"));
        assert!(!rendered.contains("got"));
    }

    #[test]
    fn test_missing_raw_renders_empty() {
        let errors = merge(None, "MY_PORT", "must be set", None);
        assert!(errors.to_string().contains(r#"MY_PORT must be set: got """#));
    }

    #[test]
    fn test_keys_in_first_failure_order() {
        let mut errors = EnvErrors::new();
        errors.push("B", "bad", None);
        errors.push("A", "bad", None);
        errors.push("B", "worse", None);

        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["B", "A"]);
        assert!(errors.contains_key("A"));
        assert!(!errors.contains_key("C"));

        let first = errors.iter().next().unwrap();
        assert_eq!(first.key(), "B");
        assert_eq!(first.message(), "bad: worse");
        assert_eq!(first.raw(), None);
    }
}
