//! Collaboration limits from TOML (`[collaboration]` section)

use serde::{Deserialize, Serialize};
use tandem_application::CollaborationParams;

/// Raw collaboration limits from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCollaborationConfig {
    /// Round limit, counting the initial draft
    pub max_rounds: usize,
    /// Session token cap
    pub max_session_tokens: usize,
    /// Reply cap for every call except the summary
    pub max_response_tokens: usize,
    /// Reply cap for the summary call
    pub summary_max_tokens: usize,
}

impl Default for FileCollaborationConfig {
    fn default() -> Self {
        let params = CollaborationParams::default();
        Self {
            max_rounds: params.max_rounds,
            max_session_tokens: params.max_session_tokens,
            max_response_tokens: params.max_response_tokens,
            summary_max_tokens: params.summary_max_tokens,
        }
    }
}

impl FileCollaborationConfig {
    pub fn to_params(&self) -> CollaborationParams {
        CollaborationParams::default()
            .with_max_rounds(self.max_rounds)
            .with_max_session_tokens(self.max_session_tokens)
            .with_max_response_tokens(self.max_response_tokens)
            .with_summary_max_tokens(self.summary_max_tokens)
    }
}
