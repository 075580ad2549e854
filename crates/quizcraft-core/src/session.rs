//! Quiz session state machine.
//!
//! A session is the transient state of one in-progress or just-completed
//! quiz interaction: Idle → Requesting → Active → Scored. It owns the
//! current quiz and the in-progress answer vector and is discarded once an
//! attempt is committed or the session is abandoned. Nothing here touches
//! the ledger or the provider; the session engine drives those.

use uuid::Uuid;

use crate::error::QuizError;
use crate::model::{Quiz, OPTION_COUNT};
use crate::scoring::{self, ScoreCard};

/// Which phase the session is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No topic chosen.
    Idle,
    /// Generation in flight.
    Requesting,
    /// Quiz present, answers in progress.
    Active,
    /// Feedback computed and attached.
    Scored,
}

/// Session state, with the data each phase owns.
#[derive(Debug, Clone)]
enum State {
    Idle,
    Requesting {
        topic: String,
    },
    Active {
        topic: String,
        quiz: Quiz,
        answers: Vec<Option<usize>>,
    },
    Scored {
        topic: String,
        quiz: Quiz,
        card: ScoreCard,
    },
}

/// One user's transient quiz session.
#[derive(Debug, Clone)]
pub struct QuizSession {
    /// Stable id for log correlation across the session's lifetime.
    id: Uuid,
    state: State,
    /// Last generation failure, kept for display until the next request.
    last_error: Option<String>,
    /// Last requested topic, kept intact so a failed generation can be
    /// retried without re-entering it.
    last_topic: Option<String>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: State::Idle,
            last_error: None,
            last_topic: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> SessionPhase {
        match self.state {
            State::Idle => SessionPhase::Idle,
            State::Requesting { .. } => SessionPhase::Requesting,
            State::Active { .. } => SessionPhase::Active,
            State::Scored { .. } => SessionPhase::Scored,
        }
    }

    /// The topic of the current request, quiz, or scorecard.
    pub fn topic(&self) -> Option<&str> {
        match &self.state {
            State::Idle => None,
            State::Requesting { topic }
            | State::Active { topic, .. }
            | State::Scored { topic, .. } => Some(topic),
        }
    }

    /// The quiz being answered or just scored.
    pub fn quiz(&self) -> Option<&Quiz> {
        match &self.state {
            State::Active { quiz, .. } | State::Scored { quiz, .. } => Some(quiz),
            _ => None,
        }
    }

    /// The in-progress answer vector, one slot per question.
    pub fn answers(&self) -> Option<&[Option<usize>]> {
        match &self.state {
            State::Active { answers, .. } => Some(answers),
            _ => None,
        }
    }

    /// The attached scorecard, once scored.
    pub fn scorecard(&self) -> Option<&ScoreCard> {
        match &self.state {
            State::Scored { card, .. } => Some(card),
            _ => None,
        }
    }

    /// The most recent generation failure, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The most recently requested topic, surviving generation failure.
    pub fn last_topic(&self) -> Option<&str> {
        self.last_topic.as_deref()
    }

    /// Idle/Scored → Requesting. A previously attempted quiz's state is
    /// replaced, not merged.
    pub fn begin_request(&mut self, topic: &str) -> Result<(), QuizError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(QuizError::Validation("topic must not be empty".into()));
        }
        if matches!(self.state, State::Requesting { .. }) {
            return Err(QuizError::Validation(
                "a quiz request is already in progress".into(),
            ));
        }
        self.last_error = None;
        self.last_topic = Some(topic.to_string());
        self.state = State::Requesting {
            topic: topic.to_string(),
        };
        Ok(())
    }

    /// Requesting → Active: attach the generated quiz and initialize every
    /// answer slot to unset.
    pub fn quiz_ready(&mut self, quiz: Quiz) -> Result<(), QuizError> {
        let topic = match &self.state {
            State::Requesting { topic } => topic.clone(),
            _ => {
                return Err(QuizError::Validation(
                    "no quiz request is in progress".into(),
                ))
            }
        };
        let answers = vec![None; quiz.len()];
        self.state = State::Active {
            topic,
            quiz,
            answers,
        };
        Ok(())
    }

    /// Requesting → Idle: record the failure for display; the topic stays
    /// available through [`QuizSession::last_topic`] for retry.
    pub fn quiz_failed(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
        self.state = State::Idle;
    }

    /// Select an option for a question. Allowed any time while Active,
    /// including re-selecting a different option for an already-answered
    /// question (idempotent overwrite).
    pub fn select_answer(&mut self, question: usize, option: usize) -> Result<(), QuizError> {
        let State::Active { quiz, answers, .. } = &mut self.state else {
            return Err(QuizError::Validation("no quiz is being answered".into()));
        };
        if question >= quiz.len() {
            return Err(QuizError::Validation(format!(
                "question index {question} is out of range"
            )));
        }
        if option >= OPTION_COUNT {
            return Err(QuizError::Validation(format!(
                "option index {option} is out of range"
            )));
        }
        answers[question] = Some(option);
        Ok(())
    }

    /// Active → Scored: score the quiz once every slot is set.
    ///
    /// Rejects with [`QuizError::IncompleteAnswers`] if any slot is unset,
    /// leaving the session Active with answers intact.
    pub fn submit(&mut self) -> Result<ScoreCard, QuizError> {
        let State::Active {
            topic,
            quiz,
            answers,
        } = &self.state
        else {
            return Err(QuizError::Validation("no quiz is being answered".into()));
        };

        let card = scoring::score(quiz, answers)?;
        self.state = State::Scored {
            topic: topic.clone(),
            quiz: quiz.clone(),
            card: card.clone(),
        };
        Ok(card)
    }

    /// Any state → Idle: discard quiz, answers, and feedback. Used both for
    /// "take another quiz" (identity retained by the engine) and logout.
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.last_error = None;
        self.last_topic = None;
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_fixtures::{all_correct_answers, sample_quiz};
    use crate::model::QUESTION_COUNT;

    fn active_session() -> QuizSession {
        let mut session = QuizSession::new();
        session.begin_request("Space").unwrap();
        session.quiz_ready(sample_quiz()).unwrap();
        session
    }

    #[test]
    fn starts_idle() {
        let session = QuizSession::new();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.quiz().is_none());
        assert!(session.last_error().is_none());
    }

    #[test]
    fn empty_topic_rejected() {
        let mut session = QuizSession::new();
        assert!(matches!(
            session.begin_request("   ").unwrap_err(),
            QuizError::Validation(_)
        ));
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn successful_generation_initializes_unset_answers() {
        let session = active_session();
        assert_eq!(session.phase(), SessionPhase::Active);
        let answers = session.answers().unwrap();
        assert_eq!(answers.len(), QUESTION_COUNT);
        assert!(answers.iter().all(|a| a.is_none()));
    }

    #[test]
    fn failed_generation_returns_to_idle_keeping_topic() {
        let mut session = QuizSession::new();
        session.begin_request("Space").unwrap();
        session.quiz_failed("provider unreachable");

        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.last_error(), Some("provider unreachable"));
        assert_eq!(session.last_topic(), Some("Space"));

        // Retry with the same topic works.
        session.begin_request("Space").unwrap();
        assert_eq!(session.phase(), SessionPhase::Requesting);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn select_answer_overwrites() {
        let mut session = active_session();
        session.select_answer(2, 0).unwrap();
        session.select_answer(2, 3).unwrap();
        assert_eq!(session.answers().unwrap()[2], Some(3));
    }

    #[test]
    fn select_answer_bounds_checked() {
        let mut session = active_session();
        assert!(session.select_answer(QUESTION_COUNT, 0).is_err());
        assert!(session.select_answer(0, OPTION_COUNT).is_err());
        assert!(session.select_answer(0, 3).is_ok());
    }

    #[test]
    fn submit_with_unset_slot_stays_active() {
        let mut session = active_session();
        for i in 0..QUESTION_COUNT {
            if i != 3 {
                session.select_answer(i, 0).unwrap();
            }
        }

        let err = session.submit().unwrap_err();
        assert!(matches!(err, QuizError::IncompleteAnswers { .. }));
        assert_eq!(session.phase(), SessionPhase::Active);
        // Answers are intact for completion.
        assert_eq!(session.answers().unwrap()[0], Some(0));
    }

    #[test]
    fn submit_transitions_to_scored() {
        let mut session = active_session();
        for (i, answer) in all_correct_answers().into_iter().enumerate() {
            session.select_answer(i, answer.unwrap()).unwrap();
        }

        let card = session.submit().unwrap();
        assert_eq!(card.score, QUESTION_COUNT as u32);
        assert_eq!(session.phase(), SessionPhase::Scored);
        assert_eq!(session.scorecard().unwrap().score, card.score);
    }

    #[test]
    fn new_request_replaces_scored_quiz() {
        let mut session = active_session();
        for i in 0..QUESTION_COUNT {
            session.select_answer(i, 0).unwrap();
        }
        session.submit().unwrap();

        session.begin_request("Oceans").unwrap();
        assert_eq!(session.phase(), SessionPhase::Requesting);
        assert_eq!(session.topic(), Some("Oceans"));
        assert!(session.scorecard().is_none());
    }

    #[test]
    fn reset_discards_everything() {
        let mut session = active_session();
        session.reset();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.quiz().is_none());
        assert!(session.last_topic().is_none());
    }

    #[test]
    fn double_request_rejected_while_in_flight() {
        let mut session = QuizSession::new();
        session.begin_request("Space").unwrap();
        assert!(session.begin_request("Oceans").is_err());
        assert_eq!(session.topic(), Some("Space"));
    }
}
