//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;
use tandem_domain::OutputFormat;

/// CLI arguments for tandem
#[derive(Parser, Debug)]
#[command(name = "tandem")]
#[command(author, version, about = "Two LLMs take turns improving one answer")]
#[command(long_about = r#"
Tandem runs a structured collaboration between two LLMs on a single prompt.

The process has four phases:
1. Prompt Improvement: the improver model rewrites your prompt
2. Initial Generation: the generator drafts a first answer
3. Review Cycle: reviewer and generator alternate, each turn under a
   different editorial personality, until one declares READY, the round
   limit is reached, or the token budget runs out
4. Summary: the generator summarizes how the answer evolved

Models are given as provider:model, with provider one of
openai, anthropic, google or xai. The reviewer defaults to the generator.

Configuration files are loaded from (in priority order):
1. TANDEM_* environment variables
2. --config <path>     Explicit config file
3. ./tandem.toml       Project-level config
4. ~/.config/tandem/config.toml   Global config

Example:
  tandem --generator openai:gpt-4o --improver anthropic:claude-sonnet-4 "Explain photosynthesis"
  tandem -o full --max-rounds 4 "Write a haiku about Rust"
  tandem --chat
"#)]
pub struct Cli {
    /// The prompt to collaborate on (not required in chat mode)
    pub prompt: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Model that rewrites the prompt (provider:model)
    #[arg(long, value_name = "PROVIDER:MODEL")]
    pub improver: Option<String>,

    /// Model that drafts the answer and the summary (provider:model)
    #[arg(short, long, value_name = "PROVIDER:MODEL")]
    pub generator: Option<String>,

    /// Model that critiques and revises (provider:model, defaults to generator)
    #[arg(short, long, value_name = "PROVIDER:MODEL")]
    pub reviewer: Option<String>,

    /// Upper bound on review rounds
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<usize>,

    /// Token cap for the whole session
    #[arg(long, value_name = "TOKENS")]
    pub max_tokens: Option<usize>,

    /// Output format: full, final or json
    #[arg(short, long, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List the models each configured provider supports and exit
    #[arg(long)]
    pub list_models: bool,

    /// Write a JSONL transcript into this directory
    #[arg(long, value_name = "DIR")]
    pub transcript: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_roles_and_limits() {
        let cli = Cli::try_parse_from([
            "tandem",
            "--improver",
            "anthropic:claude-sonnet-4",
            "-g",
            "openai:gpt-4o",
            "--max-rounds",
            "4",
            "--max-tokens",
            "50000",
            "Explain photosynthesis",
        ])
        .unwrap();

        assert_eq!(cli.prompt.as_deref(), Some("Explain photosynthesis"));
        assert_eq!(cli.improver.as_deref(), Some("anthropic:claude-sonnet-4"));
        assert_eq!(cli.generator.as_deref(), Some("openai:gpt-4o"));
        assert!(cli.reviewer.is_none());
        assert_eq!(cli.max_rounds, Some(4));
        assert_eq!(cli.max_tokens, Some(50_000));
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_parse_output_format() {
        let cli = Cli::try_parse_from(["tandem", "-o", "json", "Q"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));

        assert!(Cli::try_parse_from(["tandem", "-o", "yaml", "Q"]).is_err());
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::try_parse_from(["tandem", "-vvv", "--chat"]).unwrap();
        assert_eq!(cli.verbose, 3);
        assert!(cli.chat);
        assert!(cli.prompt.is_none());
    }
}
