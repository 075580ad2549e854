//! Provider error types.
//!
//! These represent failures when talking to an LLM provider. The gateway
//! downcasts them to decide whether a failure is a credential problem
//! (`QuizError::Configuration`) or a generation failure
//! (`QuizError::Generation`) without string matching.

use thiserror::Error;

/// Errors that can occur when interacting with an LLM provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The API returned a 429 rate limit response. Surfaced immediately;
    /// this system never retries on the user's behalf.
    #[error("rate limited by provider")]
    RateLimited,

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Returns `true` if this error means the credential itself is bad, as
    /// opposed to a transient or content-level failure.
    pub fn is_credential_failure(&self) -> bool {
        matches!(self, ProviderError::AuthenticationFailed(_))
    }
}
