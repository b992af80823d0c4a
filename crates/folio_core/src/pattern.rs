//! Name patterns for recognizing index documents and stripping alias prefixes.
//!
//! Patterns come straight from user configuration, so they are compiled once into a
//! [`NamePattern`] that can never fail at match time: an invalid regular expression
//! degrades to a literal match of the same text, and an empty pattern matches nothing.

use std::borrow::Cow;

use regex::Regex;

/// A compiled, user-supplied name pattern.
#[derive(Debug, Clone)]
pub enum NamePattern {
    /// Empty pattern. Matches nothing.
    Never,
    /// The pattern compiled as a regular expression.
    Regex(Regex),
    /// The pattern was not a valid regex and is matched as literal text.
    Literal(Regex),
}

impl NamePattern {
    /// Compile a pattern, falling back to literal matching when it is not a valid regex.
    pub fn compile(pattern: &str) -> Self {
        if pattern.is_empty() {
            return NamePattern::Never;
        }

        match Regex::new(pattern) {
            Ok(re) => NamePattern::Regex(re),
            Err(err) => {
                log::debug!(
                    "Pattern {:?} is not a valid regex ({}), matching literally",
                    pattern,
                    err
                );
                match Regex::new(&regex::escape(pattern)) {
                    Ok(re) => NamePattern::Literal(re),
                    // An escaped pattern only fails on size limits
                    Err(_) => NamePattern::Never,
                }
            }
        }
    }

    /// Returns true if the pattern matches anywhere in `name`.
    pub fn is_match(&self, name: &str) -> bool {
        match self {
            NamePattern::Never => false,
            NamePattern::Regex(re) | NamePattern::Literal(re) => re.is_match(name),
        }
    }

    /// Remove the first match of the pattern from `name`.
    pub fn strip<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self {
            NamePattern::Never => Cow::Borrowed(name),
            NamePattern::Regex(re) | NamePattern::Literal(re) => re.replace(name, ""),
        }
    }

    /// Whether this pattern can match anything at all.
    pub fn is_never(&self) -> bool {
        matches!(self, NamePattern::Never)
    }
}

/// One-shot helper: does `name` match `pattern`?
pub fn matches(name: &str, pattern: &str) -> bool {
    NamePattern::compile(pattern).is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pattern_matches_nothing() {
        assert!(!matches("00 - Home", ""));
        assert!(!matches("", ""));
        assert!(NamePattern::compile("").is_never());
    }

    #[test]
    fn test_default_identifier_pattern() {
        assert!(matches("00 - Projects", r"^\d{2} - "));
        assert!(matches("42 - Answers", r"^\d{2} - "));
        assert!(!matches("Notes", r"^\d{2} - "));
        assert!(!matches("Notes 00 - x", r"^\d{2} - "));
    }

    #[test]
    fn test_unanchored_by_default() {
        assert!(matches("My Index Page", "Index"));
    }

    #[test]
    fn test_invalid_regex_falls_back_to_literal() {
        let pattern = NamePattern::compile("(unclosed");
        assert!(matches!(pattern, NamePattern::Literal(_)));
        assert!(pattern.is_match("(unclosed"));
        assert!(pattern.is_match("prefix (unclosed suffix"));
        assert!(!pattern.is_match("unclosed"));
    }

    #[test]
    fn test_strip_removes_first_match_only() {
        let pattern = NamePattern::compile(r"\d{2} - ");
        assert_eq!(pattern.strip("00 - Sub 01 - x"), "Sub 01 - x");
        assert_eq!(NamePattern::Never.strip("00 - Sub"), "00 - Sub");
    }
}
