//! Model configuration value objects
//!
//! A [`ModelConfig`] binds a provider identifier to a provider-specific model
//! name. Callers usually arrive with loosely-typed input (TOML, CLI flags), so
//! [`ModelConfigInput`] and [`ModelSelection`] carry optional fields and are
//! validated into [`CollaborationModels`] before any model is contacted.

use crate::core::error::DomainError;
use crate::core::provider::ProviderKind;
use serde::{Deserialize, Serialize};

/// A validated provider + model pair (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelConfig {
    pub provider: ProviderKind,
    pub model: String,
}

impl ModelConfig {
    pub fn new(provider: ProviderKind, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }
}

impl std::fmt::Display for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.provider, self.model)
    }
}

/// Parses the compact `provider:model` (or `provider/model`) form.
impl std::str::FromStr for ModelConfig {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (provider, model) = s
            .split_once(':')
            .or_else(|| s.split_once('/'))
            .ok_or(DomainError::MissingModelField {
                role: "model",
                field: "provider",
            })?;
        ModelConfigInput {
            provider: Some(provider.to_string()),
            model: Some(model.to_string()),
        }
        .validate("model")
    }
}

/// Unvalidated model configuration as supplied by a caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfigInput {
    pub provider: Option<String>,
    pub model: Option<String>,
}

impl ModelConfigInput {
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: Some(provider.into()),
            model: Some(model.into()),
        }
    }

    /// Validate into a [`ModelConfig`], naming `role` in any error.
    pub fn validate(&self, role: &'static str) -> Result<ModelConfig, DomainError> {
        let provider = non_empty(self.provider.as_deref()).ok_or(
            DomainError::MissingModelField {
                role,
                field: "provider",
            },
        )?;
        let model = non_empty(self.model.as_deref())
            .ok_or(DomainError::MissingModelField { role, field: "model" })?;

        Ok(ModelConfig::new(provider.parse()?, model))
    }
}

impl From<ModelConfig> for ModelConfigInput {
    fn from(config: ModelConfig) -> Self {
        Self {
            provider: Some(config.provider.to_string()),
            model: Some(config.model),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Unvalidated role assignment for a collaboration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSelection {
    pub improver: Option<ModelConfigInput>,
    pub generator: Option<ModelConfigInput>,
    pub reviewer: Option<ModelConfigInput>,
}

impl ModelSelection {
    /// Validate every role. `reviewer` falls back to `generator` when omitted.
    pub fn resolve(&self) -> Result<CollaborationModels, DomainError> {
        let improver = self
            .improver
            .as_ref()
            .ok_or(DomainError::MissingModelRole("improver"))?
            .validate("improver")?;
        let generator = self
            .generator
            .as_ref()
            .ok_or(DomainError::MissingModelRole("generator"))?
            .validate("generator")?;
        let reviewer = match &self.reviewer {
            Some(input) => input.validate("reviewer")?,
            None => generator.clone(),
        };

        Ok(CollaborationModels {
            improver,
            generator,
            reviewer,
        })
    }
}

/// Validated role assignment for one collaboration session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationModels {
    pub improver: ModelConfig,
    pub generator: ModelConfig,
    pub reviewer: ModelConfig,
}

impl CollaborationModels {
    pub fn new(improver: ModelConfig, generator: ModelConfig, reviewer: ModelConfig) -> Self {
        Self {
            improver,
            generator,
            reviewer,
        }
    }

    /// Every configured model, improver first
    pub fn all(&self) -> [&ModelConfig; 3] {
        [&self.improver, &self.generator, &self.reviewer]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact_form() {
        let config: ModelConfig = "openai:gpt-4o-mini".parse().unwrap();
        assert_eq!(config.provider, ProviderKind::OpenAi);
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.to_string(), "openai:gpt-4o-mini");

        let config: ModelConfig = "anthropic/claude-3-5-haiku-20241022".parse().unwrap();
        assert_eq!(config.provider, ProviderKind::Anthropic);
    }

    #[test]
    fn test_parse_compact_form_without_separator() {
        assert!("gpt-4o".parse::<ModelConfig>().is_err());
    }

    #[test]
    fn test_missing_model_field() {
        let input = ModelConfigInput {
            provider: Some("openai".to_string()),
            model: Some("   ".to_string()),
        };
        assert_eq!(
            input.validate("generator").unwrap_err(),
            DomainError::MissingModelField {
                role: "generator",
                field: "model"
            }
        );
    }

    #[test]
    fn test_unsupported_provider() {
        let input = ModelConfigInput::new("acme", "rocket-1");
        assert_eq!(
            input.validate("improver").unwrap_err(),
            DomainError::UnsupportedProvider("acme".to_string())
        );
    }

    #[test]
    fn test_reviewer_defaults_to_generator() {
        let selection = ModelSelection {
            improver: Some(ModelConfigInput::new("openai", "gpt-4o-mini")),
            generator: Some(ModelConfigInput::new("google", "gemini-1.5-pro")),
            reviewer: None,
        };
        let models = selection.resolve().unwrap();
        assert_eq!(models.reviewer, models.generator);
        assert_eq!(models.reviewer.provider, ProviderKind::Google);
    }

    #[test]
    fn test_missing_roles() {
        let selection = ModelSelection {
            improver: None,
            generator: Some(ModelConfigInput::new("openai", "gpt-4o")),
            reviewer: None,
        };
        assert_eq!(
            selection.resolve().unwrap_err(),
            DomainError::MissingModelRole("improver")
        );

        let selection = ModelSelection {
            improver: Some(ModelConfigInput::new("openai", "gpt-4o")),
            ..Default::default()
        };
        assert_eq!(
            selection.resolve().unwrap_err(),
            DomainError::MissingModelRole("generator")
        );
    }
}
