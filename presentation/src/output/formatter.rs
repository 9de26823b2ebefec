//! Output formatter trait

use tandem_domain::{OutputFormat, Session};

/// Trait for formatting completed collaboration sessions
pub trait OutputFormatter {
    /// Every phase: improved prompt, each exchange, final response, summary
    fn format_full(&self, session: &Session) -> String;

    /// Final response and summary only
    fn format_final(&self, session: &Session) -> String;

    /// The whole session as JSON
    fn format_json(&self, session: &Session) -> String;

    /// Dispatch on the selected format
    fn render(&self, session: &Session, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format_full(session),
            OutputFormat::Final => self.format_final(session),
            OutputFormat::Json => self.format_json(session),
        }
    }
}
