//! Text normalization applied to every captured field

use crate::collaboration::ReadyStatus;
use regex::Regex;
use std::sync::LazyLock;

static LEADING_BOLD_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*[^*]+\*\*:?\s*").unwrap());

static HEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]*").unwrap());

static BULLET_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[-*+][ \t]+").unwrap());

static FIRST_INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Strip a stray leading label, markdown headings and bullet markers, then trim
pub fn clean_text(text: &str) -> String {
    let text = LEADING_BOLD_LABEL.replace(text.trim_start(), "");
    let text = HEADING_MARKER.replace_all(&text, "");
    let text = BULLET_MARKER.replace_all(&text, "");
    text.trim().to_string()
}

/// First run of digits in `text`, saturating on overflow
pub fn parse_confidence(text: &str) -> Option<u32> {
    let digits = FIRST_INTEGER.find(text)?.as_str();
    Some(digits.parse::<u32>().unwrap_or(u32::MAX))
}

/// `Ready` only when the field is the word READY on its own.
///
/// Case, wrapping markup and trailing punctuation are ignored. Anything else,
/// including negations and the `READY/NOT_READY` placeholder, is `NotReady`.
pub fn parse_ready_status(text: &str) -> ReadyStatus {
    let word = text
        .trim()
        .trim_matches(|c: char| matches!(c, '*' | '`' | '"' | '\'' | '[' | ']'))
        .trim_end_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace());

    if word.eq_ignore_ascii_case("READY") {
        ReadyStatus::Ready
    } else {
        ReadyStatus::NotReady
    }
}
