//! User prompt value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The prompt a user asks the collaborating models to answer (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPrompt {
    content: String,
}

impl UserPrompt {
    /// Try to create a new prompt, rejecting empty or whitespace-only content
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::EmptyPrompt)
        } else {
            Ok(Self { content })
        }
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for UserPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_creation() {
        let prompt = UserPrompt::try_new("Explain photosynthesis").unwrap();
        assert_eq!(prompt.content(), "Explain photosynthesis");
    }

    #[test]
    fn test_empty_prompt_rejected() {
        assert_eq!(UserPrompt::try_new("").unwrap_err(), DomainError::EmptyPrompt);
        assert_eq!(
            UserPrompt::try_new(" \n\t").unwrap_err(),
            DomainError::EmptyPrompt
        );
    }
}
