//! Model Provider port
//!
//! Defines the interface for asking a language model for a completion, and
//! the registry that maps provider identifiers to their adapters.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tandem_domain::ProviderKind;
use thiserror::Error;

/// Errors that can occur during a provider call
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Token accounting reported by a provider, when it reports any
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetadata {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

/// One completed model call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub content: String,
    pub usage: Option<UsageMetadata>,
}

impl Generation {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
        }
    }

    pub fn with_usage(mut self, usage: UsageMetadata) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// A source of completions for one provider.
///
/// Implementations (adapters) live in the infrastructure layer. A call is a
/// single blocking request: no retries, no streaming.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider this adapter serves
    fn kind(&self) -> ProviderKind;

    /// Send `prompt` to `model`, capping the reply at `max_tokens`
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        max_tokens: usize,
    ) -> Result<Generation, ProviderError>;

    /// Model names this provider is known to accept
    fn supported_models(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Provider adapters keyed by [`ProviderKind`]
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn ModelProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter under its own kind, replacing any previous one
    pub fn register(&mut self, provider: Arc<dyn ModelProvider>) -> Option<Arc<dyn ModelProvider>> {
        self.providers.insert(provider.kind(), provider)
    }

    pub fn with_provider(mut self, provider: Arc<dyn ModelProvider>) -> Self {
        self.register(provider);
        self
    }

    pub fn get(&self, kind: ProviderKind) -> Option<Arc<dyn ModelProvider>> {
        self.providers.get(&kind).cloned()
    }

    pub fn contains(&self, kind: ProviderKind) -> bool {
        self.providers.contains_key(&kind)
    }

    /// Registered kinds, sorted
    pub fn kinds(&self) -> Vec<ProviderKind> {
        let mut kinds: Vec<_> = self.providers.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Supported models per registered provider, sorted by provider
    pub fn supported_models(&self) -> Vec<(ProviderKind, Vec<String>)> {
        self.kinds()
            .into_iter()
            .filter_map(|kind| {
                self.providers
                    .get(&kind)
                    .map(|p| (kind, p.supported_models()))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.kinds())
            .finish()
    }
}
