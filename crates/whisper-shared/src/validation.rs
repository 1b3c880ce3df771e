//! Validation rules applied to whisper text before it is accepted.

use thiserror::Error;

use crate::constants::{MAX_WHISPER_CHARS, MIN_WHISPER_CHARS};

/// A single violated rule, rendered as the message shown to the author.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextViolation {
    #[error("Whisper cannot be empty")]
    Empty,

    #[error("Whisper cannot exceed 400 characters")]
    TooLong,

    #[error("Whisper must be at least 3 characters long")]
    TooShort,
}

/// Outcome of validating whisper text: a validity flag plus the ordered
/// list of violated rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextValidation {
    violations: Vec<TextViolation>,
}

impl TextValidation {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[TextViolation] {
        &self.violations
    }

    /// Human-readable messages, in rule order.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.to_string()).collect()
    }
}

/// Check whisper text against every rule, collecting all violations rather
/// than stopping at the first.
pub fn validate_whisper_text(text: &str) -> TextValidation {
    let mut violations = Vec::new();
    let trimmed = text.trim();

    if trimmed.is_empty() {
        violations.push(TextViolation::Empty);
    }

    if text.chars().count() > MAX_WHISPER_CHARS {
        violations.push(TextViolation::TooLong);
    }

    if !text.is_empty() && trimmed.chars().count() < MIN_WHISPER_CHARS {
        violations.push(TextViolation::TooShort);
    }

    TextValidation { violations }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_invalid() {
        let result = validate_whisper_text("");
        assert!(!result.is_valid());
        assert_eq!(result.violations(), &[TextViolation::Empty]);
    }

    #[test]
    fn whitespace_only_collects_both_violations() {
        let result = validate_whisper_text("   ");
        assert!(!result.is_valid());
        assert_eq!(
            result.violations(),
            &[TextViolation::Empty, TextViolation::TooShort]
        );
    }

    #[test]
    fn short_text_is_invalid() {
        let result = validate_whisper_text("ab");
        assert!(!result.is_valid());
        assert_eq!(result.violations(), &[TextViolation::TooShort]);
    }

    #[test]
    fn long_text_is_invalid() {
        let result = validate_whisper_text(&"x".repeat(401));
        assert!(!result.is_valid());
        assert_eq!(result.violations(), &[TextViolation::TooLong]);
    }

    #[test]
    fn valid_text_has_no_violations() {
        let result = validate_whisper_text("hello");
        assert!(result.is_valid());
        assert!(result.violations().is_empty());
    }

    #[test]
    fn boundary_lengths() {
        assert!(validate_whisper_text("abc").is_valid());
        assert!(validate_whisper_text(&"x".repeat(400)).is_valid());
    }

    #[test]
    fn messages_render_in_rule_order() {
        let result = validate_whisper_text("  ");
        assert_eq!(
            result.messages(),
            vec![
                "Whisper cannot be empty".to_string(),
                "Whisper must be at least 3 characters long".to_string(),
            ]
        );
    }
}
