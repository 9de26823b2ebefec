//! Model Provider adapters
//!
//! [`CommandProvider`] is the only transport. [`build_registry`] turns the
//! `[providers.<id>]` config sections into a
//! [`ProviderRegistry`](tandem_application::ProviderRegistry).

mod command;

pub use command::CommandProvider;

use crate::config::FileProvidersConfig;
use std::sync::Arc;
use tandem_application::ProviderRegistry;
use tandem_domain::ProviderKind;
use tracing::{debug, warn};

/// Build a registry with one command-backed adapter per configured provider.
///
/// Sections whose key is not a known provider are skipped with a warning.
pub fn build_registry(config: &FileProvidersConfig) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    for (id, section) in config {
        match id.parse::<ProviderKind>() {
            Ok(kind) => {
                debug!("Registering {} via `{}`", kind, section.command);
                registry.register(Arc::new(CommandProvider::from_config(kind, section)));
            }
            Err(e) => warn!("Ignoring [providers.{}]: {}", id, e),
        }
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileConfig;

    #[test]
    fn test_build_registry_from_config() {
        let config: FileConfig = toml::from_str(
            r#"
[providers.openai]
command = "llm"
models = ["gpt-4o"]

[providers.XAI]
command = "grok"

[providers.cohere]
command = "co"
"#,
        )
        .unwrap();
        // Validation passes, so the unknown section reaches the registry builder
        assert!(config.validate().is_ok());

        let registry = build_registry(&config.providers);

        assert_eq!(registry.kinds(), vec![ProviderKind::OpenAi, ProviderKind::Xai]);
        assert_eq!(
            registry.supported_models()[0],
            (ProviderKind::OpenAi, vec!["gpt-4o".to_string()])
        );
    }

    #[test]
    fn test_empty_config_builds_empty_registry() {
        assert!(build_registry(&FileProvidersConfig::new()).is_empty());
    }
}
