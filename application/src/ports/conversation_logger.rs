//! Port for the collaboration transcript.
//!
//! Separate from `tracing` diagnostics: this records what was said (prompts,
//! exchanges, summary) as machine-readable events, one record per event.

use serde_json::Value;

/// Event type names written to the transcript
pub mod event_types {
    pub const SESSION_START: &str = "session_start";
    pub const PROMPT_IMPROVED: &str = "prompt_improved";
    pub const EXCHANGE: &str = "exchange";
    pub const BUDGET_EXHAUSTED: &str = "budget_exhausted";
    pub const SUMMARY: &str = "summary";
    pub const SESSION_COMPLETE: &str = "session_complete";
}

/// A structured transcript event: a type name and a JSON payload
#[derive(Debug, Clone)]
pub struct ConversationEvent {
    pub event_type: &'static str,
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Sink for transcript events.
///
/// `log` is synchronous and infallible; adapters swallow their own I/O
/// errors so the transcript can never abort a session.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when the transcript is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
