//! Console output formatter for collaboration sessions

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use tandem_domain::{Exchange, Session};

/// Formats sessions for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete session
    pub fn format(session: &Session) -> String {
        let mut output = String::new();

        // Header
        output.push_str(&Self::header("Tandem Collaboration"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n\n",
            "Prompt:".cyan().bold(),
            session.original_prompt()
        ));

        let models = session.models();
        output.push_str(&format!(
            "{} improver {}, generator {}, reviewer {}\n",
            "Models:".cyan().bold(),
            models.improver,
            models.generator,
            models.reviewer
        ));

        // Phase 1: Prompt Improvement
        output.push_str(&Self::section_header("Phase 1: Prompt Improvement"));
        output.push_str(&format!("\n{}\n", session.improved_prompt()));

        // Phases 2 and 3: one block per exchange
        output.push_str(&Self::section_header("Phase 2-3: Exchanges"));
        for (index, exchange) in session.exchanges().iter().enumerate() {
            output.push_str(&Self::format_exchange(index, exchange));
        }

        output.push_str(&Self::section_header("Final Response"));
        output.push_str(&format!("\n{}\n", session.final_response()));

        output.push_str(&Self::section_header("Phase 4: Summary"));
        output.push_str(&format!("\n{}\n", session.summary()));

        output.push_str(&format!("\n{}\n", Self::stats_line(session).dimmed()));
        output.push_str(&Self::footer());

        output
    }

    fn format_exchange(index: usize, exchange: &Exchange) -> String {
        let mut block = format!(
            "\n{}\n",
            format!(
                "── #{} {} ({}) ──",
                index + 1,
                exchange.personality.display_name(),
                exchange.role.display_name()
            )
            .yellow()
            .bold()
        );

        let ready = if exchange.is_ready() {
            exchange.ready_status.as_str().green()
        } else {
            exchange.ready_status.as_str().red()
        };
        block.push_str(&format!(
            "{} {}/10  {} {}  {} {}\n",
            "confidence".dimmed(),
            exchange.confidence_score,
            "status".dimmed(),
            ready,
            "tokens".dimmed(),
            exchange.token_count
        ));

        if let Some(review) = exchange.review.as_deref().filter(|r| !r.is_empty()) {
            block.push_str(&format!("{}\n{}\n", "Review:".cyan(), review));
        }
        if let Some(changes) = exchange.changes_made.as_deref().filter(|c| !c.is_empty()) {
            block.push_str(&format!("{}\n{}\n", "Changes:".cyan(), changes));
        }

        block.push_str(&format!("{}\n", exchange.current_response()));

        if !exchange.collaboration_note.is_empty() {
            block.push_str(&format!(
                "{} {}\n",
                "Note:".cyan(),
                exchange.collaboration_note
            ));
        }

        block
    }

    /// Format as JSON
    pub fn format_json(session: &Session) -> String {
        serde_json::to_string_pretty(session).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the final response and summary (concise output)
    pub fn format_final(session: &Session) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Tandem Result ===".cyan().bold()));
        output.push_str(session.final_response());
        output.push_str("\n\n");

        output.push_str(&format!("{}\n", "Summary:".cyan().bold()));
        output.push_str(session.summary());
        output.push_str("\n\n");

        output.push_str(&format!("{}\n", Self::stats_line(session).dimmed()));

        output
    }

    fn stats_line(session: &Session) -> String {
        let stopped = session
            .termination()
            .map(|reason| reason.as_str().to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{} exchanges, {} tokens, stopped: {}",
            session.exchanges().len(),
            session.total_tokens(),
            stopped
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_full(&self, session: &Session) -> String {
        Self::format(session)
    }

    fn format_final(&self, session: &Session) -> String {
        Self::format_final(session)
    }

    fn format_json(&self, session: &Session) -> String {
        Self::format_json(session)
    }
}
