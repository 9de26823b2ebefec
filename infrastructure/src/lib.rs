//! Infrastructure layer for tandem
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileCollaborationConfig, FileConfig, FileLoggingConfig,
    FileModelEntry, FileModelsConfig, FileOutputConfig, FileOutputFormat, FileProviderConfig,
    FileProvidersConfig, FileReplConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::{CommandProvider, build_registry};
