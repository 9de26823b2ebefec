//! Prompt templates for each phase of a collaboration

use crate::collaboration::Exchange;
use crate::personality::{Personality, PersonalityCatalog};

/// Everything a review-cycle template needs to know about the session
#[derive(Debug, Clone, Copy)]
pub struct ReviewContext<'a> {
    /// The improved prompt the collaboration is answering
    pub improved_prompt: &'a str,
    /// Most recent exchange, produced by the other model
    pub previous: &'a Exchange,
    /// Serialized history, see [`CollaborationPrompt::conversation_history`]
    pub history: &'a str,
    /// Display name of the model about to act
    pub current_model: &'a str,
    /// Display name of the model that produced `previous`
    pub other_model: &'a str,
    /// 1-based review-cycle iteration
    pub iteration: usize,
    pub max_rounds: usize,
}

/// Templates for generating prompts at each stage.
///
/// Pure string builders: no I/O, no failure modes.
pub struct CollaborationPrompt;

impl CollaborationPrompt {
    /// Rewrite the user's prompt for clarity. The reply is used verbatim.
    pub fn improve_prompt(user_prompt: &str) -> String {
        format!(
            r#"You are an expert prompt engineer. Transform the user's prompt to maximize AI response quality.

Enhance by:
- Adding clarity and specific context
- Including success criteria
- Structuring for optimal AI understanding
- Adding relevant constraints
- Maintaining original intent

Original prompt: {user_prompt}

Return ONLY the improved prompt. No explanations or meta-commentary."#
        )
    }

    /// First draft by the generator
    pub fn initial_generation(improved_prompt: &str) -> String {
        let personality = Personality::InitialGenerator;
        format!(
            r#"You are AI Model 1 in a collaborative AI system. You'll create a comprehensive first draft, then another AI model will review and improve your work.

Context: {improved_prompt}
Personality: {name} - {description}.

Provide response in this EXACT format:

<response>
[Your comprehensive initial answer to the prompt]
</response>

<thoughts>
[Your reasoning, approach, and areas you focused on]
</thoughts>

<confidence_score>
[Number 1-10] - Your confidence in this response's quality
</confidence_score>

<collaboration_note>
[What you'd like the other AI model to focus on reviewing/improving]
</collaboration_note>

<ready_status>
NOT_READY
</ready_status>"#,
            name = personality.display_name(),
            description = personality.description(),
        )
    }

    /// Critique of the previous exchange plus a revised answer
    pub fn critical_review(ctx: &ReviewContext<'_>) -> String {
        let personality = Personality::CriticalReviewer;
        let ReviewContext {
            improved_prompt,
            previous,
            history,
            current_model,
            other_model,
            ..
        } = *ctx;

        format!(
            r#"You are {current_model} in a collaborative AI system. You're reviewing work created by {other_model} and providing critical feedback to improve it.

Original prompt: {improved_prompt}
{other_model}'s response: {response}
{other_model}'s thoughts: {thoughts}
{other_model}'s collaboration note: {note}
{other_model}'s confidence: {confidence}
Full conversation history: {history}

Personality: {name} - {description}.

You are NOT the same AI that created the previous response. You are a different AI model with a different perspective and expertise. Review the work as if it was created by a colleague that you're helping to improve.

Respond in this EXACT format:

<review>
[Detailed critical analysis of {other_model}'s response - what works, what doesn't, what's missing]
</review>

<improvements_needed>
[Specific areas that need enhancement or correction]
</improvements_needed>

<revised_response>
[Your improved version of the response based on critical analysis]
</revised_response>

<thoughts>
[Your reasoning for the changes and critical observations]
</thoughts>

<confidence_score>
[Number 1-10] - Your confidence in this revised response
</confidence_score>

<collaboration_note>
[What you'd like {other_model} to focus on in the next iteration]
</collaboration_note>

<ready_status>
[READY/NOT_READY] - Whether you think this is ready for the user
</ready_status>"#,
            response = previous.current_response(),
            thoughts = previous.thoughts,
            note = previous.collaboration_note,
            confidence = previous.confidence_score,
            name = personality.display_name(),
            description = personality.description(),
        )
    }

    /// Revision of the current response through `personality`'s lens
    pub fn personality_revision(ctx: &ReviewContext<'_>, personality: Personality) -> String {
        let ReviewContext {
            improved_prompt,
            previous,
            history,
            current_model,
            other_model,
            iteration,
            max_rounds,
        } = *ctx;

        format!(
            r#"You are {current_model} in a collaborative AI system. You're reviewing and improving work created by {other_model} using your unique perspective and expertise.

Original prompt: {improved_prompt}
Current response (created by {other_model}): {response}
Full conversation history: {history}
{other_model}'s previous personality: {previous_personality}
{other_model}'s previous confidence: {confidence}
Iteration count: {iteration}/{max_rounds}

Personality: {personality} - {description}

You are NOT the same AI that created the previous responses. You are a different AI model with different strengths and perspectives. You're collaborating with {other_model} to create the best possible response.

PERSONALITY DESCRIPTIONS:
{catalog}

Respond in this EXACT format:

<personality_focus>
[What you're focusing on as this personality when reviewing {other_model}'s work]
</personality_focus>

<analysis>
[Your analysis from this personality's perspective of {other_model}'s work]
</analysis>

<revised_response>
[Your improved version applying this personality's strengths to {other_model}'s work]
</revised_response>

<changes_made>
[Specific changes you made to {other_model}'s work and why]
</changes_made>

<thoughts>
[Your reasoning and this personality's observations about {other_model}'s work]
</thoughts>

<confidence_score>
[Number 1-10] - Your confidence in this revised response
</confidence_score>

<collaboration_note>
[What you'd like {other_model} to focus on in the next iteration, or if you think it's complete]
</collaboration_note>

<ready_status>
[READY/NOT_READY] - Whether you think this is ready for the user
</ready_status>"#,
            response = previous.current_response(),
            previous_personality = previous.personality,
            confidence = previous.confidence_score,
            description = personality.description(),
            catalog = Self::revision_catalog(),
        )
    }

    /// Short recap of the whole session, asked of the generator
    pub fn summary(exchanges: &[Exchange]) -> String {
        let recaps = exchanges
            .iter()
            .enumerate()
            .map(|(i, ex)| {
                format!(
                    "Exchange {} ({} - {}):\n- Confidence: {}/10\n- Focus: {}\n- Key changes: {}\n- Status: {}",
                    i + 1,
                    ex.role.display_name(),
                    ex.personality,
                    ex.confidence_score,
                    non_empty_or(ex.personality_focus.as_deref(), "General improvement"),
                    non_empty_or(ex.changes_made.as_deref(), "None specified"),
                    ex.ready_status,
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            r#"Create a concise summary of the AI collaboration session between two different AI models based on the following exchanges:

{recaps}

Provide a summary that includes:
1. Overall improvement trajectory through collaboration
2. Key contributions from each AI model
3. How the different perspectives enhanced the final result
4. Final confidence level
5. Main areas of enhancement
6. Collaboration effectiveness between the two AI models

Keep the summary under 200 words and focus on the most important insights about the collaborative process."#
        )
    }

    /// One block per exchange, oldest first
    pub fn conversation_history(exchanges: &[Exchange]) -> String {
        exchanges
            .iter()
            .enumerate()
            .map(|(i, ex)| {
                format!(
                    "Exchange {} ({} - {}):\nResponse: {}\nThoughts: {}\nConfidence: {}/10\nStatus: {}",
                    i + 1,
                    ex.role.display_name(),
                    ex.personality,
                    ex.response,
                    ex.thoughts,
                    ex.confidence_score,
                    ex.ready_status,
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Pick the review-cycle template for `personality`
    pub fn review_turn(ctx: &ReviewContext<'_>, personality: Personality) -> String {
        match personality {
            Personality::CriticalReviewer => Self::critical_review(ctx),
            other => Self::personality_revision(ctx, other),
        }
    }

    /// Catalog lines for the revision template; the two opening roles are
    /// never offered as revision lenses.
    fn revision_catalog() -> String {
        PersonalityCatalog::all()
            .iter()
            .filter(|p| {
                !matches!(
                    p,
                    Personality::InitialGenerator | Personality::CriticalReviewer
                )
            })
            .map(|p| format!("- {}: {}", p, p.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn non_empty_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value {
        Some(text) if !text.trim().is_empty() => text,
        _ => fallback,
    }
}
