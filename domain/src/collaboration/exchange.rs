//! Exchange entity: one recorded model turn

use super::role::ModelRole;
use crate::extraction::ExtractedFields;
use crate::personality::Personality;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A model's self-reported signal of whether further revision is needed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadyStatus {
    Ready,
    #[default]
    NotReady,
}

impl ReadyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadyStatus::Ready => "READY",
            ReadyStatus::NotReady => "NOT_READY",
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ReadyStatus::Ready)
    }
}

impl std::fmt::Display for ReadyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which prompt template produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    Initial,
    CriticalReview,
    PersonalityRevision,
}

impl TurnKind {
    /// Template for a review-cycle turn: the critical-review template only
    /// for `CRITICAL_REVIEWER`, the generic revision template otherwise.
    pub fn for_review(personality: Personality) -> Self {
        if personality == Personality::CriticalReviewer {
            TurnKind::CriticalReview
        } else {
            TurnKind::PersonalityRevision
        }
    }
}

/// One recorded model turn (append-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub personality: Personality,
    pub kind: TurnKind,
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_response: Option<String>,
    pub thoughts: String,
    pub confidence_score: u32,
    pub collaboration_note: String,
    pub ready_status: ReadyStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improvements_needed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personality_focus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes_made: Option<String>,
    pub token_count: usize,
    pub timestamp: DateTime<Utc>,
    pub role: ModelRole,
}

impl Exchange {
    /// Build an exchange from extracted reply fields.
    ///
    /// The template decides which optional fields are carried. Review turns
    /// always carry a revised response, falling back to `response`.
    pub fn from_extracted(
        personality: Personality,
        kind: TurnKind,
        role: ModelRole,
        fields: ExtractedFields,
        token_count: usize,
    ) -> Self {
        let ExtractedFields {
            response,
            thoughts,
            confidence_score,
            collaboration_note,
            ready_status,
            review,
            improvements_needed,
            revised_response,
            personality_focus,
            analysis,
            changes_made,
        } = fields;

        let revised_response = match kind {
            TurnKind::Initial => None,
            _ if revised_response.is_empty() => Some(response.clone()),
            _ => Some(revised_response),
        };
        let critical = kind == TurnKind::CriticalReview;
        let revision = kind == TurnKind::PersonalityRevision;

        Self {
            personality,
            kind,
            response,
            revised_response,
            thoughts,
            confidence_score,
            collaboration_note,
            ready_status,
            review: critical.then_some(review),
            improvements_needed: critical.then_some(improvements_needed),
            personality_focus: revision.then_some(personality_focus),
            analysis: revision.then_some(analysis),
            changes_made: revision.then_some(changes_made),
            token_count,
            timestamp: Utc::now(),
            role,
        }
    }

    /// The text the next turn should work on: revised response when present
    pub fn current_response(&self) -> &str {
        self.revised_response.as_deref().unwrap_or(&self.response)
    }

    pub fn is_ready(&self) -> bool {
        self.ready_status.is_ready()
    }
}
