//! Parsing strategies, tried in order for every field.
//!
//! Each strategy is a pure function of the raw reply. A strategy returns
//! `None` when it cannot find the field; the extractor moves on to the next
//! one. No strategy ever fails the parse.

use super::fields::Field;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// One way of locating a field inside a raw reply
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Capture the trimmed text for `field`, or `None` when absent or empty
    fn capture(&self, raw: &str, field: Field) -> Option<String>;
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn alternation(names: &[&str]) -> String {
    names
        .iter()
        .map(|n| regex::escape(n).replace(' ', r"[\s_]+"))
        .collect::<Vec<_>>()
        .join("|")
}

// ==================== Tagged blocks ====================

static TAG_PATTERNS: LazyLock<HashMap<Field, Regex>> = LazyLock::new(|| {
    Field::ALL
        .iter()
        .map(|field| {
            let names = alternation(field.tag_names());
            let pattern = format!(r"(?is)<\s*(?:{names})\b[^>]*>(.*?)<\s*/\s*(?:{names})\s*>");
            (*field, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// `<field>...</field>` blocks, case-insensitive, synonyms accepted
pub struct TaggedBlockStrategy;

impl ExtractionStrategy for TaggedBlockStrategy {
    fn name(&self) -> &'static str {
        "tagged_block"
    }

    fn capture(&self, raw: &str, field: Field) -> Option<String> {
        TAG_PATTERNS
            .get(&field)?
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .and_then(|m| non_empty(m.as_str()))
    }
}

// ==================== Bold headers ====================

const LABEL_TERMINATOR: &str = r"(?:\s*\([^)\n]*\))?\s*(?::\s*\*\*|\*\*\s*:)";

static BOLD_PATTERNS: LazyLock<HashMap<Field, Regex>> = LazyLock::new(|| {
    Field::ALL
        .iter()
        .map(|field| {
            let labels = alternation(field.bold_labels());
            let pattern = format!(r"(?i)\*\*\s*(?:{labels}){LABEL_TERMINATOR}");
            (*field, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// Any bold label (`**Label:**` or `**Label**:`), used to find where a section ends
static ANY_BOLD_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*[^*\n]{1,60}?(?::\s*\*\*|\*\*\s*:)").unwrap()
});

/// `**Label:** text` sections, running until the next bold label or end of text
pub struct BoldHeaderStrategy;

impl ExtractionStrategy for BoldHeaderStrategy {
    fn name(&self) -> &'static str {
        "bold_header"
    }

    fn capture(&self, raw: &str, field: Field) -> Option<String> {
        let label = BOLD_PATTERNS.get(&field)?.find(raw)?;
        let rest = &raw[label.end()..];
        let end = ANY_BOLD_LABEL
            .find(rest)
            .map(|m| m.start())
            .unwrap_or(rest.len());
        non_empty(&rest[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_block_captures_multiline() {
        let raw = "<response>\nLine one\n\nLine two\n</response>";
        assert_eq!(
            TaggedBlockStrategy.capture(raw, Field::Response).as_deref(),
            Some("Line one\n\nLine two")
        );
    }

    #[test]
    fn test_tagged_block_synonyms_and_case() {
        let raw = "<ANSWER>42</Answer><Reasoning>Because</REASONING>";
        assert_eq!(
            TaggedBlockStrategy.capture(raw, Field::Response).as_deref(),
            Some("42")
        );
        assert_eq!(
            TaggedBlockStrategy.capture(raw, Field::Thoughts).as_deref(),
            Some("Because")
        );
    }

    #[test]
    fn test_tagged_block_does_not_confuse_similar_names() {
        let raw = "<revised_response>New</revised_response>";
        assert_eq!(TaggedBlockStrategy.capture(raw, Field::Response), None);
        assert_eq!(
            TaggedBlockStrategy.capture(raw, Field::RevisedResponse).as_deref(),
            Some("New")
        );

        let raw = "<confidence_score>8</confidence_score>";
        assert_eq!(
            TaggedBlockStrategy.capture(raw, Field::ConfidenceScore).as_deref(),
            Some("8")
        );
    }

    #[test]
    fn test_tagged_block_empty_is_none() {
        assert_eq!(
            TaggedBlockStrategy.capture("<thoughts>  </thoughts>", Field::Thoughts),
            None
        );
    }

    #[test]
    fn test_bold_header_runs_to_next_label() {
        let raw = "**Response:** The sky is blue.\nIt scatters light.\n**Thoughts:** Rayleigh.";
        assert_eq!(
            BoldHeaderStrategy.capture(raw, Field::Response).as_deref(),
            Some("The sky is blue.\nIt scatters light.")
        );
        assert_eq!(
            BoldHeaderStrategy.capture(raw, Field::Thoughts).as_deref(),
            Some("Rayleigh.")
        );
    }

    #[test]
    fn test_bold_header_keeps_inline_bold() {
        let raw = "**Response:** This is **very** important.";
        assert_eq!(
            BoldHeaderStrategy.capture(raw, Field::Response).as_deref(),
            Some("This is **very** important.")
        );
    }

    #[test]
    fn test_bold_header_label_variants() {
        let raw = "**Confidence (1-10)**: 7\n**Ready Status:** READY";
        assert_eq!(
            BoldHeaderStrategy.capture(raw, Field::ConfidenceScore).as_deref(),
            Some("7")
        );
        assert_eq!(
            BoldHeaderStrategy.capture(raw, Field::ReadyStatus).as_deref(),
            Some("READY")
        );
    }

    #[test]
    fn test_bold_header_ignores_other_labels() {
        let raw = "**Revised Response:** Better text";
        assert_eq!(BoldHeaderStrategy.capture(raw, Field::Response), None);
    }
}
