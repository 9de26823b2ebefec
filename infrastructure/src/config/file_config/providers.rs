//! Provider configuration from TOML (`[providers.<id>]` sections)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Program run for one provider.
///
/// The prompt is written to the program's stdin and the completion read
/// from its stdout. `{model}` and `{max_tokens}` in `args` are substituted
/// per call.
///
/// ```toml
/// [providers.openai]
/// command = "llm"
/// args = ["-m", "{model}", "-o", "max_tokens", "{max_tokens}"]
/// timeout_seconds = 300
/// models = ["gpt-4o", "gpt-4o-mini"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    pub command: String,
    pub args: Vec<String>,
    /// Per-call deadline; none when omitted
    pub timeout_seconds: Option<u64>,
    /// Model names reported by `--list-models`
    pub models: Vec<String>,
}

/// All provider sections, keyed by provider identifier
pub type FileProvidersConfig = BTreeMap<String, FileProviderConfig>;
