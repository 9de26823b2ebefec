//! CLI entrypoint for tandem
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tandem_application::{
    CollaborationParams, ProgressNotifier, RunCollaborationInput, RunCollaborationUseCase,
};
use tandem_domain::{ModelSelection, ProviderKind};
use tandem_infrastructure::{
    ConfigLoader, FileConfig, FileModelEntry, JsonlConversationLogger, build_registry,
};
use tandem_presentation::{ChatRepl, Cli, ConsoleFormatter, OutputFormatter, ProgressReporter};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    config.validate().context("Invalid configuration")?;

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = init_logging(cli.verbose, config.logging.dir.as_deref());

    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting tandem");

    // === Dependency Injection ===
    let registry = Arc::new(build_registry(&config.providers));

    if cli.list_models {
        print_supported_models(&config, &registry.supported_models());
        return Ok(());
    }

    if registry.is_empty() {
        warn!("No providers configured; add a [providers.<id>] section to tandem.toml");
    }

    let models = model_selection(&cli, &config);
    let params = collaboration_params(&cli, &config);

    let mut use_case = RunCollaborationUseCase::new(registry).with_params(params);

    let transcript_dir = cli
        .transcript
        .clone()
        .or_else(|| config.logging.transcript_dir.as_ref().map(PathBuf::from));
    if let Some(dir) = transcript_dir
        && let Some(logger) = JsonlConversationLogger::in_dir(&dir)
    {
        info!("Writing transcript to {}", logger.path().display());
        use_case = use_case.with_conversation_logger(Arc::new(logger));
    }

    let format = cli.output.or(config.output.format).unwrap_or_default();

    // Chat mode
    if cli.chat {
        let repl = ChatRepl::new(Arc::new(use_case), models)
            .with_progress(!cli.quiet && config.repl.show_progress)
            .with_output_format(format)
            .with_history_file(config.repl.history_file.as_ref().map(PathBuf::from));

        repl.run().await?;
        return Ok(());
    }

    // Single prompt mode - prompt is required
    let prompt = match cli.prompt {
        Some(p) => p,
        None => bail!("Prompt is required. Use --chat for interactive mode."),
    };

    let input = RunCollaborationInput::new(prompt, models);

    // Execute with or without progress reporting
    let progress: Box<dyn ProgressNotifier> = if cli.quiet {
        Box::new(tandem_application::NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };
    let session = use_case
        .execute_with_progress(input, progress.as_ref())
        .await?;

    println!("{}", ConsoleFormatter.render(&session, format));

    Ok(())
}

/// Install the stderr subscriber, plus a daily-rolling file layer when
/// `log_dir` is set. `RUST_LOG` overrides the `-v` level.
fn init_logging(verbose: u8, log_dir: Option<&str>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "tandem.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Config `[models]` with `--improver/--generator/--reviewer` on top
fn model_selection(cli: &Cli, config: &FileConfig) -> ModelSelection {
    let mut selection = config.models.to_selection();
    let flag = |value: &Option<String>| {
        value
            .as_ref()
            .map(|s| FileModelEntry::Compact(s.clone()).to_input())
    };

    if let Some(input) = flag(&cli.improver) {
        selection.improver = Some(input);
    }
    if let Some(input) = flag(&cli.generator) {
        selection.generator = Some(input);
    }
    if let Some(input) = flag(&cli.reviewer) {
        selection.reviewer = Some(input);
    }
    selection
}

/// Config `[collaboration]` with `--max-rounds/--max-tokens` on top
fn collaboration_params(cli: &Cli, config: &FileConfig) -> CollaborationParams {
    let mut params = config.collaboration.to_params();
    if let Some(rounds) = cli.max_rounds {
        params = params.with_max_rounds(rounds);
    }
    if let Some(tokens) = cli.max_tokens {
        params = params.with_max_session_tokens(tokens);
    }
    params
}

fn print_supported_models(config: &FileConfig, models: &[(ProviderKind, Vec<String>)]) {
    if models.is_empty() {
        println!("No providers configured.");
        return;
    }
    for (kind, names) in models {
        let command = config
            .providers
            .iter()
            .find(|(key, _)| key.parse::<ProviderKind>().ok() == Some(*kind))
            .map(|(_, p)| p.command.as_str())
            .unwrap_or("-");
        println!("{} ({})", kind, command);
        if names.is_empty() {
            println!("  (no model list configured)");
        }
        for name in names {
            println!("  - {}", name);
        }
    }
}
