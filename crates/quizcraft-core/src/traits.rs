//! Core trait definitions for quiz generation and ledger persistence.
//!
//! These are the seams of the system: `quizcraft-providers` implements
//! [`QuizProvider`] and [`QuizSource`], and `quizcraft-store` implements
//! [`LedgerStore`]. The session engine only ever sees the traits, so both
//! the generation backend and the storage technology are swappable without
//! touching session logic.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{Quiz, UserHistory};

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// Trait for LLM backends that generate text from prompts.
#[async_trait]
pub trait QuizProvider: Send + Sync {
    /// Human-readable provider name (e.g. "anthropic").
    fn name(&self) -> &str;

    /// Whether a usable credential is present.
    ///
    /// Checked synchronously before any network call so a request that is
    /// destined to fail at the transport boundary never consumes quota.
    fn has_credentials(&self) -> bool {
        true
    }

    /// Generate a completion for the given request.
    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse>;

    /// List available models for this provider.
    fn available_models(&self) -> Vec<ModelInfo>;
}

/// Request for a text completion from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model identifier (e.g. "claude-sonnet-4-20250514").
    pub model: String,
    /// The task input (the quiz topic, framed by the gateway).
    pub prompt: String,
    /// System prompt carrying the fixed quiz-format instruction.
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// Response from a provider completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The raw response content.
    pub content: String,
    /// Model that actually generated the response.
    pub model: String,
    /// Token usage.
    pub token_usage: TokenUsage,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

/// Token usage reported by a provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Information about an available model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier.
    pub id: String,
    /// Human-readable model name.
    pub name: String,
    /// Provider name.
    pub provider: String,
    /// Maximum context window size in tokens.
    pub max_context: u32,
}

// ---------------------------------------------------------------------------
// Quiz source trait
// ---------------------------------------------------------------------------

/// Trait for anything that turns a topic into a validated [`Quiz`].
///
/// The production implementation is the generation gateway in
/// `quizcraft-providers`; tests substitute canned sources.
#[async_trait]
pub trait QuizSource: Send + Sync {
    /// Generate a quiz for a non-empty topic.
    ///
    /// A single upstream failure is surfaced immediately; the source never
    /// retries on behalf of the caller.
    async fn generate_quiz(&self, topic: &str) -> Result<Quiz, QuizError>;
}

// ---------------------------------------------------------------------------
// Ledger store trait
// ---------------------------------------------------------------------------

/// The persisted mapping: identity → ordered attempt history.
pub type LedgerEntries = HashMap<String, UserHistory>;

/// Key-value persistence collaborator backing the score ledger.
///
/// Contract: `read` returns an empty mapping when no backing store exists
/// yet; it may fail on a corrupt or unreadable store, in which case the
/// ledger degrades to empty history rather than blocking the session.
pub trait LedgerStore: Send + Sync {
    /// Read the full identity → history mapping.
    fn read(&self) -> anyhow::Result<LedgerEntries>;

    /// Replace the full identity → history mapping.
    fn write(&self, entries: &LedgerEntries) -> anyhow::Result<()>;
}
