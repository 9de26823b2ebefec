//! Role-based model configuration from TOML (`[models]` section)

use serde::{Deserialize, Serialize};
use tandem_domain::{ModelConfigInput, ModelSelection};

/// One role's model, either compact or as a table
///
/// ```toml
/// [models]
/// improver = "openai:gpt-4o-mini"
/// generator = { provider = "anthropic", model = "claude-sonnet-4" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileModelEntry {
    Compact(String),
    Table(ModelConfigInput),
}

impl FileModelEntry {
    /// Unvalidated input; a compact entry without a separator has no provider
    pub fn to_input(&self) -> ModelConfigInput {
        match self {
            FileModelEntry::Table(input) => input.clone(),
            FileModelEntry::Compact(text) => {
                match text.split_once(':').or_else(|| text.split_once('/')) {
                    Some((provider, model)) => ModelConfigInput::new(provider, model),
                    None => ModelConfigInput {
                        provider: None,
                        model: Some(text.clone()),
                    },
                }
            }
        }
    }
}

/// Role-based model configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model that rewrites the user's prompt
    pub improver: Option<FileModelEntry>,
    /// Model that drafts and summarizes ("AI Model 1")
    pub generator: Option<FileModelEntry>,
    /// Model that reviews first ("AI Model 2"); defaults to the generator
    pub reviewer: Option<FileModelEntry>,
}

impl FileModelsConfig {
    pub fn to_selection(&self) -> ModelSelection {
        ModelSelection {
            improver: self.improver.as_ref().map(FileModelEntry::to_input),
            generator: self.generator.as_ref().map(FileModelEntry::to_input),
            reviewer: self.reviewer.as_ref().map(FileModelEntry::to_input),
        }
    }
}
