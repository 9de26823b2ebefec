//! Collaboration parameters: loop and budget limits for one run.

use serde::{Deserialize, Serialize};
use tandem_domain::DEFAULT_MAX_SESSION_TOKENS;

/// Limits applied to every collaboration run by
/// [`RunCollaborationUseCase`](crate::use_cases::run_collaboration::RunCollaborationUseCase).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationParams {
    /// Round limit, counting the initial draft. At most `max_rounds - 1`
    /// review turns follow the first exchange.
    pub max_rounds: usize,
    /// Session token cap enforced by the budget tracker
    pub max_session_tokens: usize,
    /// Reply cap passed to every provider call except the summary
    pub max_response_tokens: usize,
    /// Reply cap for the summary call
    pub summary_max_tokens: usize,
}

impl Default for CollaborationParams {
    fn default() -> Self {
        Self {
            max_rounds: 6,
            max_session_tokens: DEFAULT_MAX_SESSION_TOKENS,
            max_response_tokens: 30_000,
            summary_max_tokens: 1_000,
        }
    }
}

impl CollaborationParams {
    // ==================== Builder Methods ====================

    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds;
        self
    }

    pub fn with_max_session_tokens(mut self, tokens: usize) -> Self {
        self.max_session_tokens = tokens;
        self
    }

    pub fn with_max_response_tokens(mut self, tokens: usize) -> Self {
        self.max_response_tokens = tokens;
        self
    }

    pub fn with_summary_max_tokens(mut self, tokens: usize) -> Self {
        self.summary_max_tokens = tokens;
        self
    }

    /// Upper bound on exchanges a session can hold
    pub fn max_exchanges(&self) -> usize {
        self.max_rounds.max(1)
    }
}
