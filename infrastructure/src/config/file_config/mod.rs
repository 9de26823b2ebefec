//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod collaboration;
mod logging;
mod models;
mod output;
mod providers;
mod repl;

pub use collaboration::FileCollaborationConfig;
pub use logging::FileLoggingConfig;
pub use models::{FileModelEntry, FileModelsConfig};
pub use output::{FileOutputConfig, FileOutputFormat};
pub use providers::{FileProviderConfig, FileProvidersConfig};
pub use repl::FileReplConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors found while validating a loaded configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("collaboration.max_rounds cannot be 0")]
    ZeroRounds,

    #[error("collaboration.max_session_tokens cannot be 0")]
    ZeroSessionTokens,

    #[error("providers.{0}.command cannot be empty")]
    EmptyCommand(String),

    #[error("providers.{0}.timeout_seconds cannot be 0")]
    InvalidTimeout(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Role-based model selection
    pub models: FileModelsConfig,
    /// Round and token limits
    pub collaboration: FileCollaborationConfig,
    /// Command-backed providers, keyed by provider identifier
    pub providers: FileProvidersConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Log file locations
    pub logging: FileLoggingConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the configuration, reporting the first problem found
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.collaboration.max_rounds == 0 {
            return Err(ConfigValidationError::ZeroRounds);
        }
        if self.collaboration.max_session_tokens == 0 {
            return Err(ConfigValidationError::ZeroSessionTokens);
        }

        for (id, provider) in &self.providers {
            if provider.command.trim().is_empty() {
                return Err(ConfigValidationError::EmptyCommand(id.clone()));
            }
            if provider.timeout_seconds == Some(0) {
                return Err(ConfigValidationError::InvalidTimeout(id.clone()));
            }
        }

        Ok(())
    }
}
