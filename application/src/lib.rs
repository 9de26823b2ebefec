//! Application layer for tandem
//!
//! This crate contains the collaboration use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::CollaborationParams;
pub use ports::{
    conversation_logger::{
        ConversationEvent, ConversationLogger, NoConversationLogger, event_types,
    },
    model_provider::{Generation, ModelProvider, ProviderError, ProviderRegistry, UsageMetadata},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::run_collaboration::{
    CollaborationError, RunCollaborationInput, RunCollaborationUseCase, SUMMARY_SKIPPED,
};
