//! Personality catalog
//!
//! A fixed, ordered list of improvement roles. Each entry carries the
//! one-sentence description that is embedded verbatim in compiled prompts.
//! The catalog order matters: the sequencer walks it front to back.

use serde::{Deserialize, Serialize};

/// Description used for names outside the catalog
pub const FALLBACK_DESCRIPTION: &str = "General AI assistant";

/// A named rhetorical role that biases how a model revises prior work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Personality {
    InitialGenerator,
    CriticalReviewer,
    Humanizer,
    CreativityEnhancer,
    ReadabilityOptimizer,
    RedundancyChecker,
    AccuracyValidator,
    CompletenessAuditor,
    ToneRefiner,
    FinalPolish,
}

/// Catalog order
const CATALOG: [Personality; 10] = [
    Personality::InitialGenerator,
    Personality::CriticalReviewer,
    Personality::Humanizer,
    Personality::CreativityEnhancer,
    Personality::ReadabilityOptimizer,
    Personality::RedundancyChecker,
    Personality::AccuracyValidator,
    Personality::CompletenessAuditor,
    Personality::ToneRefiner,
    Personality::FinalPolish,
];

impl Personality {
    /// Canonical identifier, e.g. `CRITICAL_REVIEWER`
    pub fn as_str(&self) -> &'static str {
        match self {
            Personality::InitialGenerator => "INITIAL_GENERATOR",
            Personality::CriticalReviewer => "CRITICAL_REVIEWER",
            Personality::Humanizer => "HUMANIZER",
            Personality::CreativityEnhancer => "CREATIVITY_ENHANCER",
            Personality::ReadabilityOptimizer => "READABILITY_OPTIMIZER",
            Personality::RedundancyChecker => "REDUNDANCY_CHECKER",
            Personality::AccuracyValidator => "ACCURACY_VALIDATOR",
            Personality::CompletenessAuditor => "COMPLETENESS_AUDITOR",
            Personality::ToneRefiner => "TONE_REFINER",
            Personality::FinalPolish => "FINAL_POLISH",
        }
    }

    /// One-sentence description used inside compiled prompts
    pub fn description(&self) -> &'static str {
        match self {
            Personality::InitialGenerator => {
                "Focus on comprehensive coverage, solid foundation, thorough exploration of the topic"
            }
            Personality::CriticalReviewer => {
                "Be thorough, identify weaknesses, gaps, inaccuracies, and areas needing improvement"
            }
            Personality::Humanizer => {
                "Make content more relatable, conversational, and human-friendly"
            }
            Personality::CreativityEnhancer => {
                "Add innovative ideas, creative approaches, and fresh perspectives"
            }
            Personality::ReadabilityOptimizer => {
                "Improve clarity, flow, structure, and ease of understanding"
            }
            Personality::RedundancyChecker => {
                "Eliminate repetition, tighten content, remove unnecessary elements"
            }
            Personality::AccuracyValidator => "Fact-check, verify information, ensure correctness",
            Personality::CompletenessAuditor => {
                "Ensure all aspects are covered, nothing important is missing"
            }
            Personality::ToneRefiner => "Adjust voice, style, and tone for the intended audience",
            Personality::FinalPolish => "Last refinement for professional quality and excellence",
        }
    }

    /// Human-readable label, e.g. `CRITICAL REVIEWER`
    pub fn display_name(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl std::fmt::Display for Personality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Personality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        CATALOG
            .iter()
            .copied()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| format!("Unknown personality: {}", s))
    }
}

/// Read-only lookup over the fixed personality list
pub struct PersonalityCatalog;

impl PersonalityCatalog {
    /// Every personality, in catalog order
    pub fn all() -> &'static [Personality] {
        &CATALOG
    }

    pub fn count() -> usize {
        CATALOG.len()
    }

    pub fn describe(personality: Personality) -> &'static str {
        personality.description()
    }

    /// Describe a personality by name, falling back to a generic description
    /// for names outside the catalog.
    pub fn describe_name(name: &str) -> &'static str {
        name.parse::<Personality>()
            .map(|p| p.description())
            .unwrap_or(FALLBACK_DESCRIPTION)
    }

    pub fn index_of(personality: Personality) -> usize {
        CATALOG
            .iter()
            .position(|p| *p == personality)
            .unwrap_or(CATALOG.len() - 1)
    }

    /// Whether this is the terminal personality used once the catalog is exhausted
    pub fn is_terminal(personality: Personality) -> bool {
        personality == Self::terminal()
    }

    pub fn terminal() -> Personality {
        Personality::FinalPolish
    }

    /// Positional lookup: the entry at `round`, or the terminal personality past the end
    pub fn by_round(round: usize) -> Personality {
        CATALOG.get(round).copied().unwrap_or(Self::terminal())
    }
}
