//! Command-backed Model Provider
//!
//! Runs a configured program once per call: the prompt goes to stdin, the
//! completion comes back on stdout. Any CLI that speaks to a model this way
//! (vendor CLIs, `llm`, local runners) can back a provider.

use crate::config::FileProviderConfig;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tandem_application::ports::model_provider::{Generation, ModelProvider, ProviderError};
use tandem_domain::ProviderKind;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

const MODEL_PLACEHOLDER: &str = "{model}";
const MAX_TOKENS_PLACEHOLDER: &str = "{max_tokens}";

/// Provider adapter that spawns a program per call
#[derive(Debug, Clone)]
pub struct CommandProvider {
    kind: ProviderKind,
    command: String,
    args: Vec<String>,
    timeout: Option<Duration>,
    models: Vec<String>,
}

impl CommandProvider {
    pub fn new(kind: ProviderKind, command: impl Into<String>) -> Self {
        Self {
            kind,
            command: command.into(),
            args: Vec::new(),
            timeout: None,
            models: Vec::new(),
        }
    }

    pub fn from_config(kind: ProviderKind, config: &FileProviderConfig) -> Self {
        Self::new(kind, config.command.trim())
            .with_args(config.args.clone())
            .with_timeout(config.timeout_seconds.map(Duration::from_secs))
            .with_models(config.models.clone())
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.models = models;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Arguments with `{model}` and `{max_tokens}` filled in
    fn render_args(&self, model: &str, max_tokens: usize) -> Vec<String> {
        let max_tokens = max_tokens.to_string();
        self.args
            .iter()
            .map(|arg| {
                arg.replace(MODEL_PLACEHOLDER, model)
                    .replace(MAX_TOKENS_PLACEHOLDER, &max_tokens)
            })
            .collect()
    }

    async fn run(
        &self,
        prompt: &str,
        model: &str,
        max_tokens: usize,
    ) -> Result<Generation, ProviderError> {
        let mut cmd = Command::new(&self.command);
        cmd.args(self.render_args(model, max_tokens))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| {
            ProviderError::Unavailable(format!("Failed to spawn {}: {}", self.command, e))
        })?;

        // Feed stdin from its own task so a chatty child cannot fill the
        // stdout pipe while we are still writing.
        let writer = child.stdin.take().map(|mut stdin| {
            let bytes = prompt.as_bytes().to_vec();
            tokio::spawn(async move {
                let result = stdin.write_all(&bytes).await;
                drop(stdin);
                result
            })
        });

        let output = child.wait_with_output().await.map_err(|e| {
            ProviderError::Request(format!("Failed to wait for {}: {}", self.command, e))
        })?;

        if let Some(writer) = writer {
            match writer.await {
                Ok(Ok(())) => {}
                // The program exited without reading all of stdin
                Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    debug!("{} closed stdin early", self.command);
                }
                Ok(Err(e)) => {
                    return Err(ProviderError::Request(format!(
                        "Failed to write prompt to {}: {}",
                        self.command, e
                    )));
                }
                Err(e) => return Err(ProviderError::Other(e.to_string())),
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProviderError::Request(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        let content = String::from_utf8(output.stdout).map_err(|e| {
            ProviderError::InvalidResponse(format!(
                "{} wrote non-UTF-8 output: {}",
                self.command, e
            ))
        })?;
        if content.trim().is_empty() {
            return Err(ProviderError::InvalidResponse(format!(
                "{} returned an empty completion",
                self.command
            )));
        }

        Ok(Generation::new(content))
    }
}

#[async_trait]
impl ModelProvider for CommandProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        max_tokens: usize,
    ) -> Result<Generation, ProviderError> {
        debug!(
            "Running {} for {}:{} ({} prompt bytes)",
            self.command,
            self.kind,
            model,
            prompt.len()
        );

        let Some(limit) = self.timeout else {
            return self.run(prompt, model, max_tokens).await;
        };
        match tokio::time::timeout(limit, self.run(prompt, model, max_tokens)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("{} timed out after {:?}", self.command, limit);
                Err(ProviderError::Timeout(limit))
            }
        }
    }

    fn supported_models(&self) -> Vec<String> {
        self.models.clone()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prompt_round_trips_through_stdin() {
        let provider = CommandProvider::new(ProviderKind::OpenAi, "cat");
        let generation = provider
            .generate("<response>hi</response>", "gpt-4o", 100)
            .await
            .unwrap();
        assert_eq!(generation.content, "<response>hi</response>");
    }

    #[tokio::test]
    async fn test_large_prompt_does_not_deadlock() {
        let provider = CommandProvider::new(ProviderKind::OpenAi, "cat");
        let prompt = "a".repeat(512 * 1024);
        let generation = provider.generate(&prompt, "m", 1).await.unwrap();
        assert_eq!(generation.content.len(), prompt.len());
    }

    #[tokio::test]
    async fn test_placeholders_substituted() {
        let provider = CommandProvider::new(ProviderKind::Xai, "sh").with_args(vec![
            "-c".to_string(),
            "echo model={model} max={max_tokens}".to_string(),
        ]);
        let generation = provider.generate("ignored", "grok-3", 1000).await.unwrap();
        assert_eq!(generation.content.trim(), "model=grok-3 max=1000");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_request_error() {
        let provider = CommandProvider::new(ProviderKind::Google, "sh")
            .with_args(vec!["-c".to_string(), "echo quota >&2; exit 3".to_string()]);
        let err = provider.generate("p", "gemini", 10).await.unwrap_err();
        match err {
            ProviderError::Request(message) => assert!(message.contains("quota")),
            other => panic!("expected request error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_unavailable() {
        let provider = CommandProvider::new(ProviderKind::Anthropic, "tandem-no-such-program");
        let err = provider.generate("p", "m", 10).await.unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_empty_output_is_invalid() {
        let provider = CommandProvider::new(ProviderKind::Anthropic, "true");
        let err = provider.generate("p", "m", 10).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_timeout() {
        let provider = CommandProvider::new(ProviderKind::OpenAi, "sleep")
            .with_args(vec!["5".to_string()])
            .with_timeout(Some(Duration::from_millis(100)));
        let err = provider.generate("p", "m", 10).await.unwrap_err();
        assert!(matches!(err, ProviderError::Timeout(_)));
    }

    #[test]
    fn test_from_config() {
        let config = FileProviderConfig {
            command: " llm ".to_string(),
            args: vec!["-m".to_string(), "{model}".to_string()],
            timeout_seconds: Some(30),
            models: vec!["gpt-4o".to_string()],
        };
        let provider = CommandProvider::from_config(ProviderKind::OpenAi, &config);
        assert_eq!(provider.command(), "llm");
        assert_eq!(provider.render_args("gpt-4o", 5), vec!["-m", "gpt-4o"]);
        assert_eq!(provider.timeout, Some(Duration::from_secs(30)));
        assert_eq!(provider.supported_models(), vec!["gpt-4o".to_string()]);
    }
}
