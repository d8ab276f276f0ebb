//! Rule-based gate on raw story content.

use serde::{Deserialize, Serialize};

/// Minimum trimmed length in characters.
const MIN_CHARS: usize = 10;

/// Maximum length in characters.
const MAX_CHARS: usize = 10_000;

/// Offensive tokens, matched case-insensitively as substrings.
const DENYLIST: &[&str] = &["bodoh", "goblok", "anjing", "babi", "stupid", "idiot"];

/// A rule the content broke.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::IntoStaticStr,
)]
pub enum ValidationIssue {
    /// Fewer than 10 characters after trimming
    #[strum(serialize = "too short")]
    TooShort,
    /// More than 10,000 characters
    #[strum(serialize = "too long")]
    TooLong,
    /// Contains a denylisted token
    #[strum(serialize = "inappropriate content")]
    InappropriateContent,
}

/// Result of validating one story.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Validation {
    /// Broken rules in evaluation order
    pub issues: Vec<ValidationIssue>,
}

impl Validation {
    /// Valid iff no rule was broken.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues rendered as the messages stored on the pipeline result.
    pub fn errors(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

/// Check raw content against every rule independently.
///
/// # Examples
///
/// ```
/// use gili_pipeline::validate;
///
/// let validation = validate("hi");
/// assert!(!validation.is_valid());
/// assert_eq!(validation.errors(), vec!["too short"]);
/// ```
pub fn validate(content: &str) -> Validation {
    let mut issues = Vec::new();

    if content.trim().chars().count() < MIN_CHARS {
        issues.push(ValidationIssue::TooShort);
    }

    if content.chars().count() > MAX_CHARS {
        issues.push(ValidationIssue::TooLong);
    }

    let lowered = content.to_lowercase();
    if DENYLIST.iter().any(|token| lowered.contains(token)) {
        issues.push(ValidationIssue::InappropriateContent);
    }

    Validation { issues }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_story() {
        let validation = validate("My cat climbed the tallest tree in the park.");
        assert!(validation.is_valid());
        assert!(validation.errors().is_empty());
    }

    #[test]
    fn whitespace_does_not_count_towards_minimum() {
        let validation = validate("   short    \n\n   ");
        assert_eq!(validation.issues, vec![ValidationIssue::TooShort]);
    }

    #[test]
    fn exactly_ten_characters_is_enough() {
        assert!(validate("abcdefghij").is_valid());
        assert!(!validate("abcdefghi").is_valid());
    }

    #[test]
    fn limit_counts_characters_not_bytes() {
        let story = "é".repeat(10_000);
        assert!(validate(&story).is_valid());
        assert_eq!(
            validate(&format!("{story}é")).issues,
            vec![ValidationIssue::TooLong]
        );
    }

    #[test]
    fn too_short_and_too_long_can_co_occur() {
        let mut story = String::from("tiny");
        story.push_str(&" ".repeat(10_000));

        assert_eq!(
            validate(&story).errors(),
            vec!["too short".to_string(), "too long".to_string()]
        );
    }

    #[test]
    fn denylist_is_case_insensitive_and_reported_once() {
        let validation = validate("That STUPID idiot dog ran away from home.");
        assert_eq!(validation.errors(), vec!["inappropriate content"]);
    }

    #[test]
    fn denylist_matches_substrings() {
        assert!(!validate("The kababi stand was closed all week long.").is_valid());
    }
}
