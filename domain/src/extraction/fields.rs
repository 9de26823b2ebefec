//! Extractable reply fields

use crate::collaboration::ReadyStatus;
use serde::{Deserialize, Serialize};

/// Confidence assumed when a reply carries no usable score
pub const DEFAULT_CONFIDENCE: u32 = 5;

/// A named section a prompt template asks the model to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Response,
    Thoughts,
    ConfidenceScore,
    CollaborationNote,
    ReadyStatus,
    Review,
    ImprovementsNeeded,
    RevisedResponse,
    PersonalityFocus,
    Analysis,
    ChangesMade,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::Response,
        Field::Thoughts,
        Field::ConfidenceScore,
        Field::CollaborationNote,
        Field::ReadyStatus,
        Field::Review,
        Field::ImprovementsNeeded,
        Field::RevisedResponse,
        Field::PersonalityFocus,
        Field::Analysis,
        Field::ChangesMade,
    ];

    /// Canonical tag name, as written in prompt templates
    pub fn tag(&self) -> &'static str {
        self.tag_names()[0]
    }

    /// Tag names accepted for this field, canonical first
    pub fn tag_names(&self) -> &'static [&'static str] {
        match self {
            Field::Response => &["response", "answer"],
            Field::Thoughts => &["thoughts", "reasoning"],
            Field::ConfidenceScore => &["confidence_score", "confidence", "score"],
            Field::CollaborationNote => &["collaboration_note"],
            Field::ReadyStatus => &["ready_status", "ready", "status"],
            Field::Review => &["review"],
            Field::ImprovementsNeeded => &["improvements_needed"],
            Field::RevisedResponse => &["revised_response"],
            Field::PersonalityFocus => &["personality_focus"],
            Field::Analysis => &["analysis"],
            Field::ChangesMade => &["changes_made"],
        }
    }

    /// Bold-header labels accepted for this field, longest first
    pub fn bold_labels(&self) -> &'static [&'static str] {
        match self {
            Field::Response => &["Response", "Answer"],
            Field::Thoughts => &["Thoughts", "Reasoning"],
            Field::ConfidenceScore => &["Confidence Score", "Confidence", "Score"],
            Field::CollaborationNote => &["Collaboration Note"],
            Field::ReadyStatus => &["Ready Status", "Ready", "Status"],
            Field::Review => &["Review"],
            Field::ImprovementsNeeded => &["Improvements Needed"],
            Field::RevisedResponse => &["Revised Response"],
            Field::PersonalityFocus => &["Personality Focus"],
            Field::Analysis => &["Analysis"],
            Field::ChangesMade => &["Changes Made"],
        }
    }
}

/// Structured fields recovered from a raw model reply.
///
/// Missing text fields are empty strings; a missing score is
/// [`DEFAULT_CONFIDENCE`]; missing readiness is `NOT_READY`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub response: String,
    pub thoughts: String,
    pub confidence_score: u32,
    pub collaboration_note: String,
    pub ready_status: ReadyStatus,
    pub review: String,
    pub improvements_needed: String,
    pub revised_response: String,
    pub personality_focus: String,
    pub analysis: String,
    pub changes_made: String,
}

impl Default for ExtractedFields {
    fn default() -> Self {
        Self {
            response: String::new(),
            thoughts: String::new(),
            confidence_score: DEFAULT_CONFIDENCE,
            collaboration_note: String::new(),
            ready_status: ReadyStatus::NotReady,
            review: String::new(),
            improvements_needed: String::new(),
            revised_response: String::new(),
            personality_focus: String::new(),
            analysis: String::new(),
            changes_made: String::new(),
        }
    }
}

impl ExtractedFields {
    /// Mutable slot for a text field (score and readiness are normalized separately)
    pub(crate) fn text_slot(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Response => Some(&mut self.response),
            Field::Thoughts => Some(&mut self.thoughts),
            Field::CollaborationNote => Some(&mut self.collaboration_note),
            Field::Review => Some(&mut self.review),
            Field::ImprovementsNeeded => Some(&mut self.improvements_needed),
            Field::RevisedResponse => Some(&mut self.revised_response),
            Field::PersonalityFocus => Some(&mut self.personality_focus),
            Field::Analysis => Some(&mut self.analysis),
            Field::ChangesMade => Some(&mut self.changes_made),
            Field::ConfidenceScore | Field::ReadyStatus => None,
        }
    }
}
