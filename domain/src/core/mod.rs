//! Core domain concepts shared across all subdomains.
//!
//! - [`provider::ProviderKind`]: the closed set of supported providers
//! - [`model_config::ModelConfig`]: a provider and model pair bound to a role
//! - [`user_prompt::UserPrompt`]: a validated prompt to collaborate on
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model_config;
pub mod provider;
pub mod user_prompt;
