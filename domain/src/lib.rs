//! Domain layer for tandem
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Collaboration
//!
//! Two models take turns refining one answer. The generator drafts, the
//! reviewer critiques, and from then on each turn is biased by a
//! [`Personality`] the acting model has not used yet. The cycle stops when
//! a model reports `READY`, when the round limit is hit, or when the
//! session token budget runs out.
//!
//! ## Extraction
//!
//! Model replies are free-form text. [`ResponseExtractor`] recovers the
//! structured fields a template asked for, falling back through several
//! formats without ever failing.

pub mod budget;
pub mod collaboration;
pub mod config;
pub mod core;
pub mod extraction;
pub mod personality;
pub mod prompt;

// Re-export commonly used types
pub use budget::{DEFAULT_MAX_SESSION_TOKENS, TokenBudget};
pub use collaboration::{
    Exchange, ModelRole, Phase, ReadyStatus, Session, TerminationReason, TurnKind,
};
pub use config::OutputFormat;
pub use core::{
    error::DomainError,
    model_config::{CollaborationModels, ModelConfig, ModelConfigInput, ModelSelection},
    provider::ProviderKind,
    user_prompt::UserPrompt,
};
pub use extraction::{
    DEFAULT_CONFIDENCE, ExtractedFields, Field, ResponseExtractor, extract_fields,
};
pub use personality::{Personality, PersonalityCatalog, next_available};
pub use prompt::{CollaborationPrompt, ReviewContext};
