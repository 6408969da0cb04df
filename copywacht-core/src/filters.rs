//! filters.rs - Composable line-suppression predicates for the scanner.
//!
//! License: MIT OR Apache-2.0

use once_cell::sync::Lazy;
use regex::Regex;

// Pure comment lines (JS/TS line comments, block comment bodies, JSX comment
// delimiters). Text inside string literals still passes.
static PURE_COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(//|/\*|\*|\*/|\{/\*|\*/\})").unwrap());

// JSON-LD structured-data context markers, not human copy.
static SCHEMA_CONTEXT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)["']@context["']\s*:\s*["']https?://schema\.org"#).unwrap()
});

/// True when the line is a pure code comment.
pub fn is_pure_comment(line: &str) -> bool {
    PURE_COMMENT_RE.is_match(line)
}

/// True when the line declares a schema.org `@context`.
pub fn is_schema_context(line: &str) -> bool {
    SCHEMA_CONTEXT_RE.is_match(line)
}

/// The default suppression predicate for the tone review: skips structured
/// data and pure comment lines so only human-facing copy is linted.
pub fn default_review_filter(line: &str) -> bool {
    is_schema_context(line) || is_pure_comment(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_lines_are_detected() {
        assert!(is_pure_comment("  // een opmerking"));
        assert!(is_pure_comment("/* blok */"));
        assert!(is_pure_comment(" * midden in een blok"));
        assert!(is_pure_comment("{/* jsx commentaar */}"));
        assert!(!is_pure_comment(r#"const tekst = "geen // commentaar";"#));
    }

    #[test]
    fn schema_context_lines_are_detected() {
        assert!(is_schema_context(r#""@context": "https://schema.org","#));
        assert!(is_schema_context(r#"'@context': 'http://schema.org'"#));
        assert!(!is_schema_context("de context van dit gesprek"));
    }

    #[test]
    fn review_filter_composes_both() {
        assert!(default_review_filter("// skip"));
        assert!(default_review_filter(r#""@context": "https://schema.org""#));
        assert!(!default_review_filter("gewone tekst met context"));
    }
}
