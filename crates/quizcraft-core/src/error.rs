//! Session-level error types.
//!
//! Defined in `quizcraft-core` so the session engine and the CLI can
//! downcast and classify errors without string matching. All four variants
//! are recoverable at the session level: the session returns to its
//! pre-request state and the user may retry.

use thiserror::Error;

/// Errors surfaced to the quiz session and its caller.
#[derive(Debug, Error)]
pub enum QuizError {
    /// No usable provider credential was available. Fatal to the request,
    /// not to the process.
    #[error("provider is not configured: {0}")]
    Configuration(String),

    /// The provider call failed or returned malformed quiz content. The
    /// caller may retry with the same or a different topic.
    #[error("quiz generation failed: {0}")]
    Generation(String),

    /// The caller supplied an empty identity/topic or an out-of-range
    /// index. Always caller-correctable.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Submission was attempted before every question was answered.
    #[error("{answered} of {total} questions answered")]
    IncompleteAnswers { answered: usize, total: usize },
}

impl QuizError {
    /// Short user-facing message for this error.
    ///
    /// Internal detail (serde messages, HTTP bodies) stays in the `Display`
    /// output for logs; this is what the user sees.
    pub fn user_message(&self) -> String {
        match self {
            QuizError::Configuration(_) => {
                "No API key configured. Run `quizcraft init` and set your provider key.".into()
            }
            QuizError::Generation(_) => {
                "Could not generate a quiz for that topic. Please try again.".into()
            }
            QuizError::Validation(msg) => msg.clone(),
            QuizError::IncompleteAnswers { answered, total } => {
                format!("Please answer every question before submitting ({answered}/{total} answered).")
            }
        }
    }
}

/// Translate any error into a short user-facing message.
///
/// Known [`QuizError`]s map to their tailored message; anything else (I/O,
/// serialization) is reported generically so internal detail never reaches
/// the user.
pub fn user_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<QuizError>() {
        Some(quiz_err) => quiz_err.user_message(),
        None => "Something went wrong. Please try again.".into(),
    }
}
