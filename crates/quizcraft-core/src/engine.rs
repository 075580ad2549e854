//! Session engine: the user-facing workflow orchestrator.
//!
//! Coordinates generation, session state transitions, scoring, and the
//! ledger append as one workflow. Owns no persistent state of its own; the
//! ledger is an injected collaborator and the session is transient.

use std::sync::Arc;

use anyhow::Result;
use tracing::instrument;

use crate::error::QuizError;
use crate::ledger::Ledger;
use crate::model::{Attempt, Quiz, UserHistory};
use crate::scoring::ScoreCard;
use crate::session::QuizSession;
use crate::traits::QuizSource;

/// Everything a successful submission produces: the scorecard, the attempt
/// that was recorded, and the identity's history re-read after the append
/// so it reflects the just-recorded attempt.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub card: ScoreCard,
    pub attempt: Attempt,
    pub history: UserHistory,
}

/// Drives one user's quiz workflow end to end.
pub struct SessionEngine {
    source: Arc<dyn QuizSource>,
    ledger: Ledger,
    session: QuizSession,
    identity: Option<String>,
    /// Guard against overlapping request/submit operations on this session.
    in_flight: bool,
}

impl SessionEngine {
    pub fn new(source: Arc<dyn QuizSource>, ledger: Ledger) -> Self {
        Self {
            source,
            ledger,
            session: QuizSession::new(),
            identity: None,
            in_flight: false,
        }
    }

    /// Adopt an identity for this session. Not authentication: the identity
    /// is a caller-supplied label. Any previous session state is discarded.
    pub fn login(&mut self, identity: &str) -> Result<(), QuizError> {
        if identity.is_empty() {
            return Err(QuizError::Validation("identity must not be empty".into()));
        }
        self.identity = Some(identity.to_string());
        self.session.reset();
        Ok(())
    }

    /// Drop the identity and discard quiz, answers, and feedback.
    pub fn logout(&mut self) {
        self.identity = None;
        self.session.reset();
    }

    /// Discard the current quiz and return to Idle, keeping the identity.
    /// This is the "take another quiz" transition.
    pub fn take_another(&mut self) {
        self.session.reset();
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Request a quiz for a topic and transition the session to Active.
    ///
    /// On failure the session returns to Idle with the user-facing message
    /// recorded for display, and the error is surfaced to the caller. No
    /// automatic retry.
    #[instrument(skip(self, topic), fields(session = %self.session.id()))]
    pub async fn request_quiz(&mut self, topic: &str) -> Result<&Quiz> {
        if self.in_flight {
            return Err(
                QuizError::Validation("another operation is still in progress".into()).into(),
            );
        }
        if self.identity.is_none() {
            return Err(QuizError::Validation("log in before requesting a quiz".into()).into());
        }

        self.session.begin_request(topic)?;
        self.in_flight = true;
        let generated = self.source.generate_quiz(topic).await;
        self.in_flight = false;

        match generated {
            Ok(quiz) => {
                tracing::info!(topic, "quiz generated");
                self.session.quiz_ready(quiz)?;
                Ok(self.session.quiz().expect("session is Active"))
            }
            Err(err) => {
                tracing::warn!(topic, error = %err, "quiz generation failed");
                self.session.quiz_failed(err.user_message());
                Err(err.into())
            }
        }
    }

    /// Record an answer for a question. Idempotent overwrite.
    pub fn select_answer(&mut self, question: usize, option: usize) -> Result<(), QuizError> {
        self.session.select_answer(question, option)
    }

    /// Score the session, append the attempt to the ledger, and return the
    /// scorecard along with the refreshed history.
    ///
    /// Rejected while a prior submission is still finalizing, and with
    /// [`QuizError::IncompleteAnswers`] while any slot is unset (the
    /// session stays Active and the ledger is untouched).
    #[instrument(skip(self), fields(session = %self.session.id()))]
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        if self.in_flight {
            return Err(
                QuizError::Validation("a submission is already in progress".into()).into(),
            );
        }
        self.in_flight = true;
        let outcome = self.submit_inner();
        self.in_flight = false;
        outcome
    }

    fn submit_inner(&mut self) -> Result<SubmitOutcome> {
        let Some(identity) = self.identity.clone() else {
            return Err(QuizError::Validation("log in before submitting".into()).into());
        };
        let Some(topic) = self.session.topic().map(str::to_string) else {
            return Err(QuizError::Validation("no quiz is being answered".into()).into());
        };

        let card = self.session.submit()?;
        let attempt = Attempt::new(topic, card.score, card.total);
        self.ledger.append(&identity, attempt.clone())?;
        let history = self.ledger.history(&identity)?;

        tracing::info!(
            identity,
            score = attempt.score,
            total = attempt.total,
            "attempt recorded"
        );
        Ok(SubmitOutcome {
            card,
            attempt,
            history,
        })
    }

    /// Ordered attempt history for any identity, oldest first. Display
    /// order (e.g. newest-first) is the caller's choice.
    pub fn history(&self, identity: &str) -> Result<UserHistory> {
        self.ledger.history(identity)
    }
}
