//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("User prompt cannot be empty")]
    EmptyPrompt,

    #[error("Missing model configuration for role: {0}")]
    MissingModelRole(&'static str),

    #[error("Model configuration for {role} is missing required field `{field}`")]
    MissingModelField {
        role: &'static str,
        field: &'static str,
    },

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("Session already completed; exchanges are append-only until completion")]
    SessionClosed,
}

impl DomainError {
    /// Check if this error is a configuration problem detected before any model call
    pub fn is_configuration(&self) -> bool {
        !matches!(self, DomainError::SessionClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let error = DomainError::MissingModelField {
            role: "generator",
            field: "model",
        };
        assert_eq!(
            error.to_string(),
            "Model configuration for generator is missing required field `model`"
        );
    }

    #[test]
    fn test_is_configuration() {
        assert!(DomainError::EmptyPrompt.is_configuration());
        assert!(DomainError::UnsupportedProvider("acme".to_string()).is_configuration());
        assert!(!DomainError::SessionClosed.is_configuration());
    }
}
