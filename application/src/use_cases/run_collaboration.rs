//! Run Collaboration use case
//!
//! Drives one session through its phases: prompt improvement, initial
//! generation, the alternating review cycle, and the summary. Every turn is
//! sequential because each prompt embeds the full history so far.

use crate::config::CollaborationParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, event_types,
};
use crate::ports::model_provider::{ProviderError, ProviderRegistry};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use serde_json::json;
use std::sync::Arc;
use tandem_domain::{
    CollaborationModels, CollaborationPrompt, DomainError, Exchange, ModelConfig, ModelRole,
    ModelSelection, Personality, Phase, ProviderKind, ResponseExtractor, ReviewContext, Session,
    TerminationReason, TokenBudget, TurnKind, UserPrompt, next_available,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Summary text used when the summary call would exceed the token cap
pub const SUMMARY_SKIPPED: &str = "Summary generation skipped due to token limits.";

/// Errors that can occur during a collaboration
#[derive(Error, Debug)]
pub enum CollaborationError {
    #[error("Configuration error: {0}")]
    Configuration(#[source] DomainError),

    #[error("No provider registered for {provider} (needed by {role})")]
    UnavailableProvider {
        role: &'static str,
        provider: ProviderKind,
    },

    #[error(
        "Token limit exceeded during {phase}: turn needs {requested} tokens, {remaining} remaining"
    )]
    BudgetExceeded {
        phase: Phase,
        requested: usize,
        remaining: usize,
    },

    #[error("{role} call to {provider} failed: {source}")]
    Provider {
        role: &'static str,
        provider: ProviderKind,
        #[source]
        source: ProviderError,
    },

    #[error("Session error: {0}")]
    Session(#[source] DomainError),
}

impl CollaborationError {
    /// True when the error was raised before any model call
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CollaborationError::Configuration(_) | CollaborationError::UnavailableProvider { .. }
        )
    }
}

/// Input for the RunCollaboration use case
#[derive(Debug, Clone)]
pub struct RunCollaborationInput {
    /// The user's prompt, validated before any model call
    pub prompt: String,
    /// Role assignment; `reviewer` falls back to `generator`
    pub models: ModelSelection,
}

impl RunCollaborationInput {
    pub fn new(prompt: impl Into<String>, models: ModelSelection) -> Self {
        Self {
            prompt: prompt.into(),
            models,
        }
    }
}

/// Use case for running a two-model collaboration
pub struct RunCollaborationUseCase {
    registry: Arc<ProviderRegistry>,
    params: CollaborationParams,
    extractor: ResponseExtractor,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl RunCollaborationUseCase {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            params: CollaborationParams::default(),
            extractor: ResponseExtractor::default(),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_params(mut self, params: CollaborationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_extractor(mut self, extractor: ResponseExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn params(&self) -> &CollaborationParams {
        &self.params
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunCollaborationInput,
    ) -> Result<Session, CollaborationError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunCollaborationInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<Session, CollaborationError> {
        let prompt = UserPrompt::try_new(input.prompt).map_err(CollaborationError::Configuration)?;
        let models = input
            .models
            .resolve()
            .map_err(CollaborationError::Configuration)?;
        self.ensure_registered(&models)?;

        let mut session = Session::new(&prompt, models);
        let mut budget = TokenBudget::new(self.params.max_session_tokens);
        budget.reset();

        info!(
            "Starting collaboration {} (improver {}, generator {}, reviewer {})",
            session.id(),
            session.models().improver,
            session.models().generator,
            session.models().reviewer
        );
        self.log(
            event_types::SESSION_START,
            json!({
                "session_id": session.id(),
                "prompt": session.original_prompt(),
                "models": session.models(),
                "max_rounds": self.params.max_rounds,
                "max_session_tokens": self.params.max_session_tokens,
            }),
        );

        self.phase_improve(&mut session, &mut budget, progress).await?;
        self.phase_initial(&mut session, &mut budget, progress).await?;
        let termination = self.phase_review(&mut session, &mut budget, progress).await?;
        let summary = self.phase_summary(&mut session, &mut budget, progress).await?;

        let final_response = session.current_response().to_string();
        session
            .complete(final_response, summary, budget.session_tokens(), termination)
            .map_err(CollaborationError::Session)?;

        info!(
            "Collaboration {} finished: {} exchanges, {} tokens, stopped on {}",
            session.id(),
            session.exchanges().len(),
            session.total_tokens(),
            termination
        );
        self.log(
            event_types::SESSION_COMPLETE,
            json!({
                "session_id": session.id(),
                "exchanges": session.exchanges().len(),
                "total_tokens": session.total_tokens(),
                "average_tokens_per_turn": budget.average_per_turn(),
                "termination": termination,
                "final_response": session.final_response(),
            }),
        );

        Ok(session)
    }

    /// Every role's provider must have an adapter before the session starts
    fn ensure_registered(&self, models: &CollaborationModels) -> Result<(), CollaborationError> {
        let roles = [
            ("improver", &models.improver),
            ("generator", &models.generator),
            ("reviewer", &models.reviewer),
        ];
        for (role, model) in roles {
            if !self.registry.contains(model.provider) {
                return Err(CollaborationError::UnavailableProvider {
                    role,
                    provider: model.provider,
                });
            }
        }
        Ok(())
    }

    /// Phase 1: rewrite the user's prompt
    async fn phase_improve(
        &self,
        session: &mut Session,
        budget: &mut TokenBudget,
        progress: &dyn ProgressNotifier,
    ) -> Result<(), CollaborationError> {
        self.enter(session, Phase::PromptImprovement, progress)?;

        let improver = session.models().improver.clone();
        let prompt = CollaborationPrompt::improve_prompt(session.original_prompt());
        let reply = self
            .generate(&improver, "improver", &prompt, self.params.max_response_tokens)
            .await?;
        let cost = turn_cost(&prompt, &reply);
        charge(budget, Phase::PromptImprovement, cost)?;

        session
            .set_improved_prompt(&reply)
            .map_err(CollaborationError::Session)?;
        debug!("Improved prompt: {}", session.improved_prompt());
        self.log(
            event_types::PROMPT_IMPROVED,
            json!({
                "improved_prompt": session.improved_prompt(),
                "tokens": cost,
            }),
        );

        progress.on_phase_complete(Phase::PromptImprovement);
        Ok(())
    }

    /// Phase 2: the generator drafts the first answer
    async fn phase_initial(
        &self,
        session: &mut Session,
        budget: &mut TokenBudget,
        progress: &dyn ProgressNotifier,
    ) -> Result<(), CollaborationError> {
        self.enter(session, Phase::InitialGeneration, progress)?;

        let role = ModelRole::Generator;
        let model = session.model_for(role).clone();
        let prompt = CollaborationPrompt::initial_generation(session.improved_prompt());
        let reply = self
            .generate(&model, role.as_str(), &prompt, self.params.max_response_tokens)
            .await?;
        let cost = turn_cost(&prompt, &reply);
        charge(budget, Phase::InitialGeneration, cost)?;

        let exchange = Exchange::from_extracted(
            Personality::InitialGenerator,
            TurnKind::Initial,
            role,
            self.extractor.extract(&reply),
            cost,
        );
        self.record(session, exchange, progress)?;

        progress.on_phase_complete(Phase::InitialGeneration);
        Ok(())
    }

    /// Phase 3: alternate turns, reviewer first, until ready, round limit
    /// or token cap
    async fn phase_review(
        &self,
        session: &mut Session,
        budget: &mut TokenBudget,
        progress: &dyn ProgressNotifier,
    ) -> Result<TerminationReason, CollaborationError> {
        self.enter(session, Phase::ReviewCycle, progress)?;

        let max_rounds = self.params.max_rounds;
        let mut role = ModelRole::Reviewer;

        for iteration in 1..max_rounds {
            let Some(previous) = session.latest_exchange() else {
                break;
            };
            if previous.is_ready() {
                break;
            }

            let personality = next_available(session.personalities_used(role));
            info!("Round {}/{}: {} as {}", iteration, max_rounds, role, personality);
            progress.on_turn_start(role, personality, iteration);

            let history = CollaborationPrompt::conversation_history(session.exchanges());
            let context = ReviewContext {
                improved_prompt: session.improved_prompt(),
                previous,
                history: &history,
                current_model: role.display_name(),
                other_model: role.other().display_name(),
                iteration,
                max_rounds,
            };
            let prompt = CollaborationPrompt::review_turn(&context, personality);
            let model = session.model_for(role).clone();

            let reply = self
                .generate(&model, role.as_str(), &prompt, self.params.max_response_tokens)
                .await?;
            let cost = turn_cost(&prompt, &reply);

            if budget.would_exceed(cost) {
                warn!(
                    "Token limit reached in round {} ({} needed, {} remaining); stopping review cycle",
                    iteration,
                    cost,
                    budget.remaining()
                );
                progress.on_budget_exhausted(cost, budget.remaining());
                self.log(
                    event_types::BUDGET_EXHAUSTED,
                    json!({
                        "round": iteration,
                        "role": role.as_str(),
                        "personality": personality,
                        "requested": cost,
                        "remaining": budget.remaining(),
                    }),
                );
                progress.on_phase_complete(Phase::ReviewCycle);
                return Ok(TerminationReason::BudgetExhausted);
            }
            budget.add(cost);

            let exchange = Exchange::from_extracted(
                personality,
                TurnKind::for_review(personality),
                role,
                self.extractor.extract(&reply),
                cost,
            );
            self.record(session, exchange, progress)?;

            role = role.other();
        }

        progress.on_phase_complete(Phase::ReviewCycle);

        let ready = session.latest_exchange().is_some_and(Exchange::is_ready);
        Ok(if ready {
            TerminationReason::Ready
        } else {
            TerminationReason::RoundLimit
        })
    }

    /// Phase 4: the generator summarizes the exchanges. Degrades to a
    /// placeholder instead of failing when the cap is reached.
    async fn phase_summary(
        &self,
        session: &mut Session,
        budget: &mut TokenBudget,
        progress: &dyn ProgressNotifier,
    ) -> Result<String, CollaborationError> {
        self.enter(session, Phase::Summary, progress)?;

        let role = ModelRole::Generator;
        let model = session.model_for(role).clone();
        let prompt = CollaborationPrompt::summary(session.exchanges());
        let reply = self
            .generate(&model, role.as_str(), &prompt, self.params.summary_max_tokens)
            .await?;
        let cost = turn_cost(&prompt, &reply);

        let summary = if budget.would_exceed(cost) {
            warn!(
                "Skipping summary: {} tokens needed, {} remaining",
                cost,
                budget.remaining()
            );
            SUMMARY_SKIPPED.to_string()
        } else {
            budget.add(cost);
            reply.trim().to_string()
        };

        self.log(
            event_types::SUMMARY,
            json!({
                "summary": summary,
                "tokens": cost,
                "skipped": summary == SUMMARY_SKIPPED,
            }),
        );
        progress.on_phase_complete(Phase::Summary);
        Ok(summary)
    }

    // ==================== Helpers ====================

    fn enter(
        &self,
        session: &mut Session,
        phase: Phase,
        progress: &dyn ProgressNotifier,
    ) -> Result<(), CollaborationError> {
        info!("Phase: {}", phase);
        session
            .enter_phase(phase)
            .map_err(CollaborationError::Session)?;
        progress.on_phase_start(phase);
        Ok(())
    }

    fn record(
        &self,
        session: &mut Session,
        exchange: Exchange,
        progress: &dyn ProgressNotifier,
    ) -> Result<(), CollaborationError> {
        debug!(
            "{} ({}) confidence {}, {}",
            exchange.role, exchange.personality, exchange.confidence_score, exchange.ready_status
        );
        self.log(
            event_types::EXCHANGE,
            json!({
                "index": session.exchanges().len(),
                "exchange": &exchange,
            }),
        );
        progress.on_exchange_recorded(&exchange);
        session
            .record_exchange(exchange)
            .map_err(CollaborationError::Session)
    }

    async fn generate(
        &self,
        model: &ModelConfig,
        role: &'static str,
        prompt: &str,
        max_tokens: usize,
    ) -> Result<String, CollaborationError> {
        let provider = self.registry.get(model.provider).ok_or(
            CollaborationError::UnavailableProvider {
                role,
                provider: model.provider,
            },
        )?;

        debug!("Sending {} chars to {} as {}", prompt.len(), model, role);
        match provider.generate(prompt, &model.model, max_tokens).await {
            Ok(generation) => {
                if let Some(usage) = &generation.usage {
                    debug!("{} reported usage {:?}", model, usage);
                }
                Ok(generation.content)
            }
            Err(source) => {
                warn!("{} call to {} failed: {}", role, model, source);
                Err(CollaborationError::Provider {
                    role,
                    provider: model.provider,
                    source,
                })
            }
        }
    }

    fn log(&self, event_type: &'static str, payload: serde_json::Value) {
        self.conversation_logger
            .log(ConversationEvent::new(event_type, payload));
    }
}

/// Cost of one call: the prompt and the reply counted together
fn turn_cost(prompt: &str, reply: &str) -> usize {
    TokenBudget::count_tokens(&[prompt, reply].concat())
}

/// Charge a turn that must fit, failing the session otherwise
fn charge(budget: &mut TokenBudget, phase: Phase, cost: usize) -> Result<(), CollaborationError> {
    if budget.would_exceed(cost) {
        warn!(
            "Token limit exceeded during {}: {} needed, {} remaining",
            phase,
            cost,
            budget.remaining()
        );
        return Err(CollaborationError::BudgetExceeded {
            phase,
            requested: cost,
            remaining: budget.remaining(),
        });
    }
    budget.add(cost);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::model_provider::{Generation, ModelProvider};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tandem_domain::{ModelConfigInput, ReadyStatus};

    // ==================== Test Mocks ====================

    /// Replays canned replies in order and records every call
    struct ScriptedProvider {
        kind: ProviderKind,
        replies: Mutex<VecDeque<Result<String, ProviderError>>>,
        calls: Mutex<Vec<(String, String, usize)>>,
    }

    impl ScriptedProvider {
        fn new(kind: ProviderKind, replies: Vec<String>) -> Self {
            Self::with_results(kind, replies.into_iter().map(Ok).collect())
        }

        fn with_results(kind: ProviderKind, replies: Vec<Result<String, ProviderError>>) -> Self {
            Self {
                kind,
                replies: Mutex::new(VecDeque::from(replies)),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(prompt, _, _)| prompt.clone())
                .collect()
        }

        fn max_tokens(&self) -> Vec<usize> {
            self.calls.lock().unwrap().iter().map(|c| c.2).collect()
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ModelProvider for ScriptedProvider {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        async fn generate(
            &self,
            prompt: &str,
            model: &str,
            max_tokens: usize,
        ) -> Result<Generation, ProviderError> {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), model.to_string(), max_tokens));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ProviderError::Other("No more replies".to_string())))
                .map(Generation::new)
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    // ==================== Fixtures ====================

    fn draft(text: &str, ready: &str) -> String {
        format!(
            "<response>{text}</response>\n\
             <thoughts>First pass.</thoughts>\n\
             <confidence_score>6</confidence_score>\n\
             <collaboration_note>Check the details.</collaboration_note>\n\
             <ready_status>{ready}</ready_status>"
        )
    }

    fn revision(text: &str, ready: &str) -> String {
        format!(
            "<personality_focus>Clarity</personality_focus>\n\
             <analysis>Reads well.</analysis>\n\
             <revised_response>{text}</revised_response>\n\
             <changes_made>Tightened wording.</changes_made>\n\
             <thoughts>Small edits.</thoughts>\n\
             <confidence_score>8</confidence_score>\n\
             <ready_status>{ready}</ready_status>"
        )
    }

    fn selection(provider: &str) -> ModelSelection {
        ModelSelection {
            improver: Some(ModelConfigInput::new(provider, "improver-model")),
            generator: Some(ModelConfigInput::new(provider, "generator-model")),
            reviewer: Some(ModelConfigInput::new(provider, "reviewer-model")),
        }
    }

    fn use_case(provider: &Arc<ScriptedProvider>) -> RunCollaborationUseCase {
        let registry = ProviderRegistry::new().with_provider(provider.clone());
        RunCollaborationUseCase::new(Arc::new(registry))
    }

    fn input(prompt: &str) -> RunCollaborationInput {
        RunCollaborationInput::new(prompt, selection("openai"))
    }

    // ==================== Scenarios ====================

    #[tokio::test]
    async fn test_improved_prompt_stored_trimmed() {
        let provider = Arc::new(ScriptedProvider::new(
            ProviderKind::OpenAi,
            vec![
                "  Explain photosynthesis in detail for a high-school audience with examples.\n"
                    .to_string(),
                draft("Plants turn light into sugar.", "READY"),
                "Short summary.".to_string(),
            ],
        ));

        let session = use_case(&provider)
            .execute(input("Explain photosynthesis"))
            .await
            .unwrap();

        assert_eq!(session.original_prompt(), "Explain photosynthesis");
        assert_eq!(
            session.improved_prompt(),
            "Explain photosynthesis in detail for a high-school audience with examples."
        );
        assert!(provider.prompts()[1].contains(
            "Context: Explain photosynthesis in detail for a high-school audience with examples."
        ));
    }

    #[tokio::test]
    async fn test_untagged_initial_reply_kept_as_response() {
        let plain = "Photosynthesis converts light energy into chemical energy.";
        let provider = Arc::new(ScriptedProvider::new(
            ProviderKind::OpenAi,
            vec![
                "Improved".to_string(),
                plain.to_string(),
                revision("Better", "NOT_READY"),
                "Summary".to_string(),
            ],
        ));

        let session = use_case(&provider)
            .with_params(CollaborationParams::default().with_max_rounds(2))
            .execute(input("Explain photosynthesis"))
            .await
            .unwrap();

        let first = &session.exchanges()[0];
        assert_eq!(first.response, plain);
        assert_eq!(first.ready_status, ReadyStatus::NotReady);
        assert_eq!(first.confidence_score, 5);
        assert_eq!(session.exchanges().len(), 2);
        assert_eq!(session.termination(), Some(TerminationReason::RoundLimit));
    }

    #[tokio::test]
    async fn test_hedged_readiness_keeps_cycle_running() {
        let provider = Arc::new(ScriptedProvider::new(
            ProviderKind::OpenAi,
            vec![
                "Improved".to_string(),
                draft("Draft", "NOT_READY"),
                revision("Closer", "Not yet ready, needs examples"),
                revision("Final", "READY"),
                "Summary".to_string(),
            ],
        ));

        let session = use_case(&provider).execute(input("Q")).await.unwrap();

        assert_eq!(session.exchanges().len(), 3);
        assert_eq!(session.exchanges()[1].ready_status, ReadyStatus::NotReady);
        assert_eq!(session.final_response(), "Final");
        assert_eq!(session.termination(), Some(TerminationReason::Ready));
    }

    #[tokio::test]
    async fn test_full_cycle_personality_order_and_round_bound() {
        let mut replies = vec!["Improved".to_string(), draft("Draft", "NOT_READY")];
        for i in 1..=5 {
            replies.push(revision(&format!("Revision {i}"), "NOT_READY"));
        }
        replies.push("Summary".to_string());
        let provider = Arc::new(ScriptedProvider::new(ProviderKind::OpenAi, replies));

        let session = use_case(&provider).execute(input("Q")).await.unwrap();

        let turns: Vec<_> = session
            .exchanges()
            .iter()
            .map(|e| (e.role, e.personality))
            .collect();
        assert_eq!(
            turns,
            vec![
                (ModelRole::Generator, Personality::InitialGenerator),
                (ModelRole::Reviewer, Personality::InitialGenerator),
                (ModelRole::Generator, Personality::CriticalReviewer),
                (ModelRole::Reviewer, Personality::CriticalReviewer),
                (ModelRole::Generator, Personality::Humanizer),
                (ModelRole::Reviewer, Personality::Humanizer),
            ]
        );
        assert_eq!(session.exchanges().len(), 6);
        assert_eq!(session.termination(), Some(TerminationReason::RoundLimit));
        assert_eq!(session.final_response(), "Revision 5");
        assert_eq!(session.summary(), "Summary");
        assert!(session.is_complete());

        for role in [ModelRole::Generator, ModelRole::Reviewer] {
            let used = session.personalities_used(role);
            let unique: std::collections::HashSet<_> = used.iter().collect();
            assert_eq!(used.len(), unique.len());
        }

        let prompts = provider.prompts();
        assert_eq!(prompts.len(), 8);
        // The reviewer's first turn uses the revision template, not the critique
        assert!(prompts[2].starts_with("You are AI Model 2"));
        assert!(prompts[2].contains("<personality_focus>"));
        assert!(prompts[2].contains("Iteration count: 1/6"));
        assert!(prompts[3].starts_with("You are AI Model 1"));
        assert!(prompts[3].contains("<improvements_needed>"));
        assert!(prompts[3].contains("AI Model 2's response: Revision 1"));
        assert!(prompts[7].contains("Exchange 6 (AI Model 2 - HUMANIZER)"));

        assert_eq!(
            provider.max_tokens(),
            vec![30_000, 30_000, 30_000, 30_000, 30_000, 30_000, 30_000, 1_000]
        );
    }

    #[tokio::test]
    async fn test_ready_stops_cycle_early() {
        let provider = Arc::new(ScriptedProvider::new(
            ProviderKind::OpenAi,
            vec![
                "Improved".to_string(),
                draft("Draft", "NOT_READY"),
                revision("Polished answer", "READY"),
                "Summary".to_string(),
            ],
        ));
        let logger = Arc::new(RecordingLogger::default());

        let session = use_case(&provider)
            .with_conversation_logger(logger.clone())
            .execute(input("Q"))
            .await
            .unwrap();

        assert_eq!(session.exchanges().len(), 2);
        assert_eq!(session.termination(), Some(TerminationReason::Ready));
        assert_eq!(session.final_response(), "Polished answer");
        assert_eq!(provider.call_count(), 4);
        assert_eq!(
            *logger.events.lock().unwrap(),
            vec![
                event_types::SESSION_START,
                event_types::PROMPT_IMPROVED,
                event_types::EXCHANGE,
                event_types::EXCHANGE,
                event_types::SUMMARY,
                event_types::SESSION_COMPLETE,
            ]
        );
    }

    #[tokio::test]
    async fn test_ready_initial_draft_skips_review() {
        let provider = Arc::new(ScriptedProvider::new(
            ProviderKind::OpenAi,
            vec![
                "Improved".to_string(),
                draft("Done already", "READY"),
                "Summary".to_string(),
            ],
        ));

        let session = use_case(&provider).execute(input("Q")).await.unwrap();

        assert_eq!(session.exchanges().len(), 1);
        assert_eq!(session.termination(), Some(TerminationReason::Ready));
        assert_eq!(session.final_response(), "Done already");
    }

    #[tokio::test]
    async fn test_budget_exhausted_in_review_keeps_last_response() {
        let provider = Arc::new(ScriptedProvider::new(
            ProviderKind::OpenAi,
            vec![
                "Improved".to_string(),
                draft("Accepted draft", "NOT_READY"),
                revision(&"x".repeat(40_000), "NOT_READY"),
                "Summary".to_string(),
            ],
        ));
        let logger = Arc::new(RecordingLogger::default());

        let session = use_case(&provider)
            .with_params(CollaborationParams::default().with_max_session_tokens(5_000))
            .with_conversation_logger(logger.clone())
            .execute(input("Q"))
            .await
            .unwrap();

        assert_eq!(session.exchanges().len(), 1);
        assert_eq!(
            session.termination(),
            Some(TerminationReason::BudgetExhausted)
        );
        assert_eq!(session.final_response(), "Accepted draft");
        assert_eq!(session.summary(), "Summary");
        assert!(session.total_tokens() <= 5_000);
        assert!(
            logger
                .events
                .lock()
                .unwrap()
                .contains(&event_types::BUDGET_EXHAUSTED)
        );
    }

    #[tokio::test]
    async fn test_summary_degrades_to_placeholder() {
        let provider = Arc::new(ScriptedProvider::new(
            ProviderKind::OpenAi,
            vec![
                "Improved".to_string(),
                draft("Draft", "NOT_READY"),
                "y".repeat(40_000),
            ],
        ));

        let session = use_case(&provider)
            .with_params(
                CollaborationParams::default()
                    .with_max_rounds(1)
                    .with_max_session_tokens(5_000),
            )
            .execute(input("Q"))
            .await
            .unwrap();

        assert_eq!(session.summary(), SUMMARY_SKIPPED);
        assert_eq!(session.final_response(), "Draft");
        assert_eq!(session.termination(), Some(TerminationReason::RoundLimit));
    }

    #[tokio::test]
    async fn test_budget_exceeded_during_improvement_is_fatal() {
        let provider = Arc::new(ScriptedProvider::new(
            ProviderKind::OpenAi,
            vec!["Improved".to_string()],
        ));

        let result = use_case(&provider)
            .with_params(CollaborationParams::default().with_max_session_tokens(10))
            .execute(input("Q"))
            .await;

        match result {
            Err(CollaborationError::BudgetExceeded {
                phase, remaining, ..
            }) => {
                assert_eq!(phase, Phase::PromptImprovement);
                assert_eq!(remaining, 10);
            }
            other => panic!("expected budget error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_budget_exceeded_during_initial_generation_is_fatal() {
        let provider = Arc::new(ScriptedProvider::new(
            ProviderKind::OpenAi,
            vec!["Improved".to_string(), "z".repeat(40_000)],
        ));

        let result = use_case(&provider)
            .with_params(CollaborationParams::default().with_max_session_tokens(5_000))
            .execute(input("Q"))
            .await;

        assert!(matches!(
            result,
            Err(CollaborationError::BudgetExceeded {
                phase: Phase::InitialGeneration,
                ..
            })
        ));
    }

    // ==================== Errors ====================

    #[tokio::test]
    async fn test_empty_prompt_rejected_before_calls() {
        let provider = Arc::new(ScriptedProvider::new(ProviderKind::OpenAi, vec![]));

        let err = use_case(&provider).execute(input("   ")).await.unwrap_err();

        assert!(matches!(
            err,
            CollaborationError::Configuration(DomainError::EmptyPrompt)
        ));
        assert!(err.is_configuration());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_role_rejected_before_calls() {
        let provider = Arc::new(ScriptedProvider::new(ProviderKind::OpenAi, vec![]));
        let models = ModelSelection {
            generator: None,
            ..selection("openai")
        };

        let err = use_case(&provider)
            .execute(RunCollaborationInput::new("Q", models))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CollaborationError::Configuration(DomainError::MissingModelRole("generator"))
        ));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unsupported_provider_rejected() {
        let provider = Arc::new(ScriptedProvider::new(ProviderKind::OpenAi, vec![]));

        let err = use_case(&provider)
            .execute(RunCollaborationInput::new("Q", selection("cohere")))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CollaborationError::Configuration(DomainError::UnsupportedProvider(_))
        ));
    }

    #[tokio::test]
    async fn test_unregistered_provider_rejected_before_calls() {
        let provider = Arc::new(ScriptedProvider::new(ProviderKind::OpenAi, vec![]));
        let models = ModelSelection {
            reviewer: Some(ModelConfigInput::new("anthropic", "claude")),
            ..selection("openai")
        };

        let err = use_case(&provider)
            .execute(RunCollaborationInput::new("Q", models))
            .await
            .unwrap_err();

        match err {
            CollaborationError::UnavailableProvider { role, provider: kind } => {
                assert_eq!(role, "reviewer");
                assert_eq!(kind, ProviderKind::Anthropic);
            }
            other => panic!("expected unavailable provider, got {other:?}"),
        }
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_provider_error_aborts_without_retry() {
        let provider = Arc::new(ScriptedProvider::with_results(
            ProviderKind::OpenAi,
            vec![
                Ok("Improved".to_string()),
                Err(ProviderError::Request("quota exceeded".to_string())),
                Ok(draft("never used", "READY")),
            ],
        ));

        let err = use_case(&provider).execute(input("Q")).await.unwrap_err();

        match &err {
            CollaborationError::Provider { role, provider, source } => {
                assert_eq!(*role, "generator");
                assert_eq!(*provider, ProviderKind::OpenAi);
                assert!(source.to_string().contains("quota exceeded"));
            }
            other => panic!("expected provider error, got {other:?}"),
        }
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(provider.call_count(), 2);
    }

    // ==================== Model routing ====================

    #[tokio::test]
    async fn test_reviewer_defaults_to_generator() {
        let provider = Arc::new(ScriptedProvider::new(
            ProviderKind::OpenAi,
            vec![
                "Improved".to_string(),
                draft("Draft", "READY"),
                "Summary".to_string(),
            ],
        ));
        let models = ModelSelection {
            reviewer: None,
            ..selection("openai")
        };

        let session = use_case(&provider)
            .execute(RunCollaborationInput::new("Q", models))
            .await
            .unwrap();

        assert_eq!(session.models().reviewer, session.models().generator);
    }

    #[tokio::test]
    async fn test_roles_routed_to_their_providers() {
        let improver = Arc::new(ScriptedProvider::new(
            ProviderKind::OpenAi,
            vec!["Improved".to_string()],
        ));
        let generator = Arc::new(ScriptedProvider::new(
            ProviderKind::Anthropic,
            vec![draft("Draft", "NOT_READY"), "Summary".to_string()],
        ));
        let reviewer = Arc::new(ScriptedProvider::new(
            ProviderKind::Google,
            vec![revision("Reviewed", "READY")],
        ));
        let registry = ProviderRegistry::new()
            .with_provider(improver.clone())
            .with_provider(generator.clone())
            .with_provider(reviewer.clone());
        let models = ModelSelection {
            improver: Some(ModelConfigInput::new("openai", "gpt-4o")),
            generator: Some(ModelConfigInput::new("anthropic", "claude-sonnet")),
            reviewer: Some(ModelConfigInput::new("google", "gemini-pro")),
        };

        let session = RunCollaborationUseCase::new(Arc::new(registry))
            .execute(RunCollaborationInput::new("Q", models))
            .await
            .unwrap();

        assert_eq!(improver.call_count(), 1);
        assert_eq!(generator.call_count(), 2);
        assert_eq!(reviewer.call_count(), 1);
        assert_eq!(reviewer.calls.lock().unwrap()[0].1, "gemini-pro");
        assert_eq!(session.final_response(), "Reviewed");
        assert_eq!(session.exchanges()[1].role, ModelRole::Reviewer);
    }

    #[tokio::test]
    async fn test_token_total_matches_turn_costs() {
        let provider = Arc::new(ScriptedProvider::new(
            ProviderKind::OpenAi,
            vec![
                "Improved".to_string(),
                draft("Draft", "NOT_READY"),
                revision("Done", "READY"),
                "Summary".to_string(),
            ],
        ));

        let session = use_case(&provider).execute(input("Q")).await.unwrap();

        let prompts = provider.prompts();
        let replies = [
            "Improved".to_string(),
            draft("Draft", "NOT_READY"),
            revision("Done", "READY"),
            "Summary".to_string(),
        ];
        let expected: usize = prompts
            .iter()
            .zip(replies.iter())
            .map(|(p, r)| turn_cost(p, r))
            .sum();
        assert_eq!(session.total_tokens(), expected);
        assert_eq!(
            session.exchanges()[0].token_count,
            turn_cost(&prompts[1], &replies[1])
        );
    }
}
