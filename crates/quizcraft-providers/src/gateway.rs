//! Quiz generation gateway.
//!
//! Translates a topic string into a validated [`Quiz`] by delegating to a
//! provider and parsing its response. One provider call per request, no
//! retry: a single upstream failure is surfaced immediately and the caller
//! decides whether to re-invoke.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use quizcraft_core::error::QuizError;
use quizcraft_core::model::{Question, Quiz, OPTION_COUNT, QUESTION_COUNT};
use quizcraft_core::traits::{GenerateRequest, QuizProvider, QuizSource};

use crate::error::ProviderError;

/// Fixed instruction sent as the system prompt on every generation call.
pub const QUIZ_SYSTEM_PROMPT: &str = "You are a quiz generator. Given a topic, respond with a quiz of exactly 10 multiple-choice questions about that topic. Respond ONLY with a JSON object of the form {\"questions\": [{\"question\": string, \"options\": [string, string, string, string], \"correctIndex\": integer 0-3, \"explanation\": string}, ...]}. Every question must have exactly 4 distinct options. Do not include markdown formatting, commentary, or any text outside the JSON object.";

/// Turns topics into validated quizzes via an injected provider.
pub struct QuizGateway {
    provider: Arc<dyn QuizProvider>,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl QuizGateway {
    pub fn new(
        provider: Arc<dyn QuizProvider>,
        model: impl Into<String>,
        max_tokens: u32,
        temperature: f64,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens,
            temperature,
        }
    }
}

#[async_trait]
impl QuizSource for QuizGateway {
    #[instrument(skip(self), fields(provider = self.provider.name(), model = %self.model))]
    async fn generate_quiz(&self, topic: &str) -> Result<Quiz, QuizError> {
        if topic.trim().is_empty() {
            return Err(QuizError::Validation("topic must not be empty".into()));
        }

        // Credential presence is checked before the network call so a
        // request destined to fail at the transport boundary never goes out.
        if !self.provider.has_credentials() {
            return Err(QuizError::Configuration(format!(
                "no API key configured for provider '{}'",
                self.provider.name()
            )));
        }

        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: format!("Topic: {}", topic.trim()),
            system_prompt: Some(QUIZ_SYSTEM_PROMPT.to_string()),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .provider
            .generate(&request)
            .await
            .map_err(classify_provider_error)?;

        tracing::debug!(
            latency_ms = response.latency_ms,
            tokens = response.token_usage.total_tokens,
            "provider responded"
        );
        parse_quiz(&response.content)
    }
}

/// Map a provider failure onto the session error taxonomy: a credential
/// failure is a configuration problem, everything else is a generation
/// failure the user may retry.
fn classify_provider_error(err: anyhow::Error) -> QuizError {
    match err.downcast_ref::<ProviderError>() {
        Some(provider_err) if provider_err.is_credential_failure() => {
            QuizError::Configuration("provider rejected the API key".into())
        }
        _ => QuizError::Generation(format!("{err:#}")),
    }
}

/// Wire shape of the provider's quiz JSON.
#[derive(Deserialize)]
struct QuizPayload {
    questions: Vec<QuestionPayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionPayload {
    question: String,
    options: Vec<String>,
    correct_index: i64,
    explanation: String,
}

/// Parse a provider response into a validated [`Quiz`].
///
/// Any deviation (unparseable JSON, missing `questions`, wrong question or
/// option cardinality, an index outside [0, 3]) is a
/// [`QuizError::Generation`], never silently repaired.
pub fn parse_quiz(raw: &str) -> Result<Quiz, QuizError> {
    let json = extract_json(raw);
    let payload: QuizPayload = serde_json::from_str(json)
        .map_err(|e| QuizError::Generation(format!("response is not valid quiz JSON: {e}")))?;

    let questions = payload
        .questions
        .into_iter()
        .map(|q| {
            let correct_index = usize::try_from(q.correct_index).map_err(|_| {
                QuizError::Generation(format!(
                    "correctIndex {} is not a valid option index",
                    q.correct_index
                ))
            })?;
            Ok(Question {
                text: q.question,
                options: q.options,
                correct_index,
                explanation: q.explanation,
            })
        })
        .collect::<Result<Vec<_>, QuizError>>()?;

    Quiz::new(questions)
}

/// Extract the JSON payload from a provider response.
///
/// Providers sometimes wrap the JSON in a ```json fence or surround it with
/// prose despite the instruction. This slices out the fenced block if one
/// exists, or the outermost `{...}` span otherwise. Extraction only: the
/// content still has to parse and validate.
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    if let Some(fence_start) = trimmed.find("```") {
        let after_fence = &trimmed[fence_start + 3..];
        // Skip the optional language tag on the fence line.
        let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
        let body = &after_fence[body_start..];
        let body_end = body.find("```").unwrap_or(body.len());
        return body[..body_end].trim();
    }

    if let (Some(open), Some(close)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if open < close {
            return &trimmed[open..=close];
        }
    }

    trimmed
}
