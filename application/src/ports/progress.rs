//! Progress notification port
//!
//! Defines the interface for reporting progress while a collaboration runs.

use tandem_domain::{Exchange, ModelRole, Personality, Phase};

/// Callback for progress updates during a collaboration
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinners, plain lines, nothing at all).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: Phase);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: Phase);

    /// Called before a review-cycle turn is sent to its model
    fn on_turn_start(&self, _role: ModelRole, _personality: Personality, _round: usize) {}

    /// Called after an exchange has been appended to the session
    fn on_exchange_recorded(&self, _exchange: &Exchange) {}

    /// Called when the review cycle stops because the token cap was reached
    fn on_budget_exhausted(&self, _requested: usize, _remaining: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: Phase) {}
    fn on_phase_complete(&self, _phase: Phase) {}
}
