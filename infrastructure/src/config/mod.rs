//! Configuration file loading for tandem
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TANDEM_*` environment variables (`__` separates nested keys)
//! 2. `--config <path>` specified file
//! 3. Project root: `./tandem.toml` or `./.tandem.toml`
//! 4. Global: `$XDG_CONFIG_HOME/tandem/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileCollaborationConfig, FileConfig, FileLoggingConfig,
    FileModelEntry, FileModelsConfig, FileOutputConfig, FileOutputFormat, FileProviderConfig,
    FileProvidersConfig, FileReplConfig,
};
pub use loader::ConfigLoader;
