//! Session entity: one collaboration run from prompt to summary

use super::exchange::Exchange;
use super::phase::{Phase, TerminationReason};
use super::role::ModelRole;
use crate::core::error::DomainError;
use crate::core::model_config::{CollaborationModels, ModelConfig};
use crate::core::user_prompt::UserPrompt;
use crate::personality::Personality;
use serde::Serialize;

/// A collaboration session (Entity)
///
/// Exchanges are append-only and each one records its personality against
/// the acting role's used-list. Once [`Session::complete`] runs the session
/// is frozen and every mutator returns [`DomainError::SessionClosed`].
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    id: String,
    original_prompt: String,
    improved_prompt: String,
    models: CollaborationModels,
    exchanges: Vec<Exchange>,
    personalities_used: [Vec<Personality>; 2],
    total_tokens: usize,
    final_response: String,
    summary: String,
    termination: Option<TerminationReason>,
    phase: Phase,
}

impl Session {
    /// Start a new session with a fresh identifier
    pub fn new(prompt: &UserPrompt, models: CollaborationModels) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), prompt, models)
    }

    pub fn with_id(
        id: impl Into<String>,
        prompt: &UserPrompt,
        models: CollaborationModels,
    ) -> Self {
        Self {
            id: id.into(),
            original_prompt: prompt.content().to_string(),
            improved_prompt: String::new(),
            models,
            exchanges: Vec::new(),
            personalities_used: [Vec::new(), Vec::new()],
            total_tokens: 0,
            final_response: String::new(),
            summary: String::new(),
            termination: None,
            phase: Phase::PromptImprovement,
        }
    }

    // ==================== Mutators ====================

    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.phase == Phase::Done {
            Err(DomainError::SessionClosed)
        } else {
            Ok(())
        }
    }

    /// Store the improver's output, trimmed
    pub fn set_improved_prompt(&mut self, text: &str) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.improved_prompt = text.trim().to_string();
        Ok(())
    }

    pub fn enter_phase(&mut self, phase: Phase) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.phase = phase;
        Ok(())
    }

    /// Append an exchange and book its personality against the acting role
    pub fn record_exchange(&mut self, exchange: Exchange) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.personalities_used[exchange.role.index()].push(exchange.personality);
        self.exchanges.push(exchange);
        Ok(())
    }

    /// Freeze the session with its final response, summary and token total
    pub fn complete(
        &mut self,
        final_response: impl Into<String>,
        summary: impl Into<String>,
        total_tokens: usize,
        termination: TerminationReason,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.final_response = final_response.into();
        self.summary = summary.into();
        self.total_tokens = total_tokens;
        self.termination = Some(termination);
        self.phase = Phase::Done;
        Ok(())
    }

    // ==================== Accessors ====================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn original_prompt(&self) -> &str {
        &self.original_prompt
    }

    pub fn improved_prompt(&self) -> &str {
        &self.improved_prompt
    }

    pub fn models(&self) -> &CollaborationModels {
        &self.models
    }

    /// Model bound to a collaborating role
    pub fn model_for(&self, role: ModelRole) -> &ModelConfig {
        match role {
            ModelRole::Generator => &self.models.generator,
            ModelRole::Reviewer => &self.models.reviewer,
        }
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn latest_exchange(&self) -> Option<&Exchange> {
        self.exchanges.last()
    }

    /// The last accepted response (revised when available)
    pub fn current_response(&self) -> &str {
        self.latest_exchange()
            .map(Exchange::current_response)
            .unwrap_or_default()
    }

    pub fn personalities_used(&self, role: ModelRole) -> &[Personality] {
        &self.personalities_used[role.index()]
    }

    pub fn total_tokens(&self) -> usize {
        self.total_tokens
    }

    pub fn final_response(&self) -> &str {
        &self.final_response
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn termination(&self) -> Option<TerminationReason> {
        self.termination
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Done
    }
}
