//! Layered extraction of structured fields from free-form model replies.
//!
//! Models are asked to answer inside tagged blocks, but replies drift:
//! some switch to `**Label:**` headers, some wrap everything in markdown,
//! some ignore the format entirely. [`ResponseExtractor`] tries each
//! [`ExtractionStrategy`] in order per field and keeps the first non-empty
//! capture, so a reply never fails to parse. Missing fields fall back to
//! empty text, a confidence of 5 and `NOT_READY`.

pub mod cleanup;
pub mod fields;
pub mod strategy;

pub use fields::{DEFAULT_CONFIDENCE, ExtractedFields, Field};
pub use strategy::{BoldHeaderStrategy, ExtractionStrategy, TaggedBlockStrategy};

use cleanup::{clean_text, parse_confidence, parse_ready_status};

/// Ordered cascade of extraction strategies
pub struct ResponseExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Default for ResponseExtractor {
    fn default() -> Self {
        Self::new(vec![
            Box::new(TaggedBlockStrategy),
            Box::new(BoldHeaderStrategy),
        ])
    }
}

impl ResponseExtractor {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Names of the configured strategies, in the order they are tried
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    fn capture(&self, raw: &str, field: Field) -> Option<String> {
        self.strategies
            .iter()
            .filter_map(|s| s.capture(raw, field))
            .map(|text| clean_text(&text))
            .find(|text| !text.is_empty())
    }

    /// Extract every known field from `raw`. Never fails.
    ///
    /// When no strategy finds a response, the whole trimmed reply becomes the
    /// response so that an unformatted answer is still usable.
    pub fn extract(&self, raw: &str) -> ExtractedFields {
        let mut fields = ExtractedFields::default();

        for field in Field::ALL {
            let Some(text) = self.capture(raw, field) else {
                continue;
            };
            match field {
                Field::ConfidenceScore => {
                    if let Some(score) = parse_confidence(&text) {
                        fields.confidence_score = score;
                    }
                }
                Field::ReadyStatus => fields.ready_status = parse_ready_status(&text),
                _ => {
                    if let Some(slot) = fields.text_slot(field) {
                        *slot = text;
                    }
                }
            }
        }

        if fields.response.is_empty() {
            fields.response = raw.trim().to_string();
        }

        fields
    }
}

/// Extract with the default tagged-then-bold cascade
pub fn extract_fields(raw: &str) -> ExtractedFields {
    ResponseExtractor::default().extract(raw)
}
