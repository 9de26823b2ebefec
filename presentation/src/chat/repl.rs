//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output::console::ConsoleFormatter;
use crate::output::formatter::OutputFormatter;
use crate::progress::reporter::ProgressReporter;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tandem_application::{RunCollaborationInput, RunCollaborationUseCase};
use tandem_domain::{ModelSelection, OutputFormat};
use tracing::warn;

const HISTORY_CAPACITY: usize = 1000;

/// Slash commands understood by the REPL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Models,
    Quit,
    Unknown,
}

impl ReplCommand {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/models" => ReplCommand::Models,
            _ => ReplCommand::Unknown,
        }
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: Arc<RunCollaborationUseCase>,
    models: ModelSelection,
    show_progress: bool,
    output_format: OutputFormat,
    history_file: Option<PathBuf>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(use_case: Arc<RunCollaborationUseCase>, models: ModelSelection) -> Self {
        Self {
            use_case,
            models,
            show_progress: true,
            output_format: OutputFormat::Final,
            history_file: dirs::data_dir().map(|p| p.join("tandem").join("history.txt")),
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Set how each finished session is printed
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Override the history file location
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.history_file = path;
        }
        self
    }

    fn line_editor(&self) -> Reedline {
        let editor = Reedline::create();

        let Some(path) = &self.history_file else {
            return editor;
        };
        if !ensure_history_dir(path) {
            return editor;
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("Could not open history file {}: {}", path.display(), e);
                editor
            }
        }
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> std::io::Result<()> {
        let mut editor = self.line_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("tandem".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    // Handle commands
                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    self.process_prompt(line).await;
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│              Tandem - Chat Mode             │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        self.print_models();
        self.print_help();
    }

    fn print_help(&self) {
        println!("Commands:");
        println!("  /help, /h, /?    - Show this help");
        println!("  /models          - Show current models");
        println!("  /quit, /exit, /q - Exit chat");
        println!();
    }

    fn print_models(&self) {
        match self.models.resolve() {
            Ok(models) => {
                println!("Models:");
                println!("  improver:  {}", models.improver);
                println!("  generator: {}", models.generator);
                println!("  reviewer:  {}", models.reviewer);
            }
            Err(e) => println!("Models are not fully configured: {}", e),
        }
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&self, cmd: &str) -> bool {
        match ReplCommand::parse(cmd) {
            ReplCommand::Quit => {
                println!("Bye!");
                true
            }
            ReplCommand::Help => {
                println!();
                self.print_help();
                false
            }
            ReplCommand::Models => {
                println!();
                self.print_models();
                false
            }
            ReplCommand::Unknown => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_prompt(&self, prompt: &str) {
        println!();

        let input = RunCollaborationInput::new(prompt, self.models.clone());

        let result = if self.show_progress {
            let progress = ProgressReporter::new();
            self.use_case.execute_with_progress(input, &progress).await
        } else {
            self.use_case.execute(input).await
        };

        match result {
            Ok(session) => {
                println!("{}", ConsoleFormatter.render(&session, self.output_format));
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
        println!();
    }
}

/// Create the history file's parent directory. Returns false (after a
/// warning) when it cannot be created.
fn ensure_history_dir(path: &Path) -> bool {
    let Some(parent) = path.parent() else {
        return true;
    };
    match std::fs::create_dir_all(parent) {
        Ok(()) => true,
        Err(e) => {
            warn!("Could not create history directory {}: {}", parent.display(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_history_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.txt");

        assert!(ensure_history_dir(&path));
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_ensure_history_dir_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();

        assert!(!ensure_history_dir(&blocker.join("history.txt")));
    }

    #[test]
    fn test_parse_commands_and_aliases() {
        assert_eq!(ReplCommand::parse("/quit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/q"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/exit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/help"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/?"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse(" /models "), ReplCommand::Models);
        assert_eq!(ReplCommand::parse("/rounds"), ReplCommand::Unknown);
    }
}
