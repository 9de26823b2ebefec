//! Prompt domain
//!
//! Builds the exact text sent to a model at each phase of a collaboration.

mod template;

pub use template::{CollaborationPrompt, ReviewContext};
