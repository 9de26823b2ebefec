//! Token budget for bounding a collaboration session's spend.
//!
//! [`TokenBudget`] approximates the cost of every model call and keeps a
//! running total for one session. It is owned by the session run that
//! created it and never shared between sessions.
//!
//! # Cost model
//!
//! Cost is `ceil(chars / 4)` over the prompt plus the reply. This is an
//! estimate, not a tokenizer; it only needs to be monotonic and cheap.

use serde::{Deserialize, Serialize};

/// Default session-wide cap
pub const DEFAULT_MAX_SESSION_TOKENS: usize = 1_000_000;

/// Per-session token accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBudget {
    max_session_tokens: usize,
    session_tokens: usize,
    history: Vec<usize>,
}

impl TokenBudget {
    pub fn new(max_session_tokens: usize) -> Self {
        Self {
            max_session_tokens,
            session_tokens: 0,
            history: Vec::new(),
        }
    }

    /// Approximate token cost of `text`: `ceil(chars / 4)`, 0 for empty text.
    pub fn count_tokens(text: &str) -> usize {
        text.chars().count().div_ceil(4)
    }

    /// Accumulate `tokens` into the session total and record them as one turn.
    ///
    /// Returns the new total.
    pub fn add(&mut self, tokens: usize) -> usize {
        self.session_tokens = self.session_tokens.saturating_add(tokens);
        self.history.push(tokens);
        self.session_tokens
    }

    /// True when adding `tokens` would push the total past the cap.
    pub fn would_exceed(&self, tokens: usize) -> bool {
        self.session_tokens.saturating_add(tokens) > self.max_session_tokens
    }

    /// True when a single reply of `tokens` is larger than `limit`.
    pub fn exceeds_response_limit(tokens: usize, limit: usize) -> bool {
        tokens > limit
    }

    /// Zero the total and clear the per-turn history.
    pub fn reset(&mut self) {
        self.session_tokens = 0;
        self.history.clear();
    }

    // ==================== Accessors ====================

    pub fn session_tokens(&self) -> usize {
        self.session_tokens
    }

    pub fn max_session_tokens(&self) -> usize {
        self.max_session_tokens
    }

    pub fn remaining(&self) -> usize {
        self.max_session_tokens.saturating_sub(self.session_tokens)
    }

    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Rounded mean cost per recorded turn (0 when nothing was recorded)
    pub fn average_per_turn(&self) -> usize {
        if self.history.is_empty() {
            return 0;
        }
        let sum: usize = self.history.iter().sum();
        (sum as f64 / self.history.len() as f64).round() as usize
    }
}

impl Default for TokenBudget {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSION_TOKENS)
    }
}
