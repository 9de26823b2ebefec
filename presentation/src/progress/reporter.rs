//! Progress reporting for collaboration runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use tandem_application::ports::progress::ProgressNotifier;
use tandem_domain::{Exchange, ModelRole, Personality, Phase};

/// Reports progress with one spinner per phase
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn phase_display_name(phase: Phase) -> &'static str {
        match phase {
            Phase::PromptImprovement => "Phase 1: Prompt Improvement",
            Phase::InitialGeneration => "Phase 2: Initial Generation",
            Phase::ReviewCycle => "Phase 3: Review Cycle",
            Phase::Summary => "Phase 4: Summary",
            Phase::Done => "Done",
        }
    }

    fn phase_short_name(phase: Phase) -> &'static str {
        match phase {
            Phase::PromptImprovement => "Phase 1",
            Phase::InitialGeneration => "Phase 2",
            Phase::ReviewCycle => "Phase 3",
            Phase::Summary => "Phase 4",
            Phase::Done => "Done",
        }
    }

    fn turn_message(role: ModelRole, personality: Personality, round: usize) -> String {
        format!(
            "round {}: {} as {}",
            round,
            role.display_name(),
            personality.display_name()
        )
    }

    fn exchange_message(exchange: &Exchange) -> String {
        let status = if exchange.is_ready() {
            "v".green()
        } else {
            "~".yellow()
        };
        format!(
            "{} {} (confidence {})",
            status,
            exchange.personality.display_name(),
            exchange.confidence_score
        )
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.phase_bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: Phase) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(Self::phase_display_name(phase));
        pb.set_message("Starting...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.phase_bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_turn_start(&self, role: ModelRole, personality: Personality, round: usize) {
        self.with_bar(|pb| pb.set_message(Self::turn_message(role, personality, round)));
    }

    fn on_exchange_recorded(&self, exchange: &Exchange) {
        let message = Self::exchange_message(exchange);
        self.with_bar(|pb| pb.println(format!("  {}", message)));
    }

    fn on_budget_exhausted(&self, requested: usize, remaining: usize) {
        self.with_bar(|pb| {
            pb.println(format!(
                "  {} token budget exhausted ({} requested, {} remaining)",
                "!".yellow(),
                requested,
                remaining
            ))
        });
    }

    fn on_phase_complete(&self, phase: Phase) {
        let taken = self.phase_bar.lock().ok().and_then(|mut guard| guard.take());
        if let Some(pb) = taken {
            let phase_name = Self::phase_short_name(phase);
            pb.finish_with_message(format!("{} complete!", phase_name.green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: Phase) {
        let phase_name = ProgressReporter::phase_display_name(phase);
        eprintln!("{} {}", "->".cyan(), phase_name.bold());
    }

    fn on_turn_start(&self, role: ModelRole, personality: Personality, round: usize) {
        eprintln!(
            "  {}",
            ProgressReporter::turn_message(role, personality, round)
        );
    }

    fn on_exchange_recorded(&self, exchange: &Exchange) {
        eprintln!("  {}", ProgressReporter::exchange_message(exchange));
    }

    fn on_budget_exhausted(&self, requested: usize, remaining: usize) {
        eprintln!(
            "  {} token budget exhausted ({} requested, {} remaining)",
            "!".yellow(),
            requested,
            remaining
        );
    }

    fn on_phase_complete(&self, _phase: Phase) {
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_names_are_numbered_in_order() {
        let phases = [
            Phase::PromptImprovement,
            Phase::InitialGeneration,
            Phase::ReviewCycle,
            Phase::Summary,
        ];
        for (i, phase) in phases.into_iter().enumerate() {
            let expected = format!("Phase {}", i + 1);
            assert_eq!(ProgressReporter::phase_short_name(phase), expected);
            assert!(ProgressReporter::phase_display_name(phase).starts_with(&expected));
        }
    }

    #[test]
    fn test_turn_message_names_role_and_personality() {
        let message =
            ProgressReporter::turn_message(ModelRole::Reviewer, Personality::Humanizer, 3);
        assert_eq!(message, "round 3: AI Model 2 as HUMANIZER");
    }

    #[test]
    fn test_reporter_survives_unbalanced_callbacks() {
        let reporter = ProgressReporter::new();
        // No active phase: callbacks are no-ops
        reporter.on_turn_start(ModelRole::Generator, Personality::ToneRefiner, 1);
        reporter.on_phase_complete(Phase::Summary);

        reporter.on_phase_start(Phase::ReviewCycle);
        reporter.on_budget_exhausted(500, 20);
        reporter.on_phase_complete(Phase::ReviewCycle);
        assert!(reporter.phase_bar.lock().unwrap().is_none());
    }
}
