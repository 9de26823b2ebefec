//! Collaboration phases and termination reasons

use serde::{Deserialize, Serialize};

/// Phase of a collaboration session, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The improver rewrites the user's prompt
    PromptImprovement,
    /// The generator drafts the first answer
    InitialGeneration,
    /// The two models alternate critiquing and revising
    ReviewCycle,
    /// The generator summarizes the exchange history
    Summary,
    /// Session finished; no further mutation
    Done,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::PromptImprovement => "prompt_improvement",
            Phase::InitialGeneration => "initial_generation",
            Phase::ReviewCycle => "review_cycle",
            Phase::Summary => "summary",
            Phase::Done => "done",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::PromptImprovement => "Prompt Improvement",
            Phase::InitialGeneration => "Initial Generation",
            Phase::ReviewCycle => "Review Cycle",
            Phase::Summary => "Summary",
            Phase::Done => "Done",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Why the review cycle stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// The most recent exchange declared itself ready
    Ready,
    /// The configured round limit was reached
    RoundLimit,
    /// The next turn would have exceeded the session token cap
    BudgetExhausted,
}

impl TerminationReason {
    pub fn as_str(&self) -> &str {
        match self {
            TerminationReason::Ready => "ready",
            TerminationReason::RoundLimit => "round_limit",
            TerminationReason::BudgetExhausted => "budget_exhausted",
        }
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
