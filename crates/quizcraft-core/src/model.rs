//! Core data model types for quizcraft.
//!
//! These are the fundamental types the entire quizcraft system uses to
//! represent generated quizzes and recorded attempts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Every quiz has exactly this many questions.
pub const QUESTION_COUNT: usize = 10;

/// Every question has exactly this many options.
pub const OPTION_COUNT: usize = 4;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text shown to the user.
    pub text: String,
    /// The answer options, in display order.
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct_index: usize,
    /// Explanation of the correct answer, shown after scoring.
    pub explanation: String,
}

impl Question {
    /// Check the structural invariants: exactly [`OPTION_COUNT`] options,
    /// no duplicate options, and `correct_index` inside the option range.
    ///
    /// A question that fails any of these is malformed provider output and
    /// is rejected rather than repaired.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.options.len() != OPTION_COUNT {
            return Err(QuizError::Generation(format!(
                "question has {} options, expected {OPTION_COUNT}",
                self.options.len()
            )));
        }
        if self.correct_index >= self.options.len() {
            return Err(QuizError::Generation(format!(
                "correct_index {} is out of range for {} options",
                self.correct_index,
                self.options.len()
            )));
        }
        for (i, option) in self.options.iter().enumerate() {
            if self.options[..i].contains(option) {
                return Err(QuizError::Generation(format!(
                    "duplicate option: {option:?}"
                )));
            }
        }
        Ok(())
    }
}

/// A generated quiz: exactly [`QUESTION_COUNT`] validated questions.
///
/// Immutable once constructed. The only way to build one is through
/// [`Quiz::new`], which enforces the structural invariants, so any `Quiz`
/// value in the system is well-formed by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    questions: Vec<Question>,
}

impl Quiz {
    /// Build a quiz from questions, rejecting malformed input.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.len() != QUESTION_COUNT {
            return Err(QuizError::Generation(format!(
                "expected {QUESTION_COUNT} questions, got {}",
                questions.len()
            )));
        }
        for question in &questions {
            question.validate()?;
        }
        Ok(Self { questions })
    }

    /// The questions in display order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions (always [`QUESTION_COUNT`]).
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get a question by index.
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}

/// One completed, scored quiz-taking event for one identity.
///
/// Created once at submission time and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    /// The topic the quiz was generated for.
    pub topic: String,
    /// Number of correctly answered questions.
    pub score: u32,
    /// Total number of questions in the quiz.
    pub total: u32,
    /// When the attempt was submitted.
    pub timestamp: DateTime<Utc>,
}

impl Attempt {
    /// Create an attempt stamped with the current time.
    pub fn new(topic: impl Into<String>, score: u32, total: u32) -> Self {
        Self {
            topic: topic.into(),
            score,
            total,
            timestamp: Utc::now(),
        }
    }

    /// Score as a percentage in [0, 100].
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.score as f64 / self.total as f64 * 100.0
        }
    }
}

/// Ordered attempt history for a single identity. Append-only.
pub type UserHistory = Vec<Attempt>;


#[cfg(test)]
mod tests {
    use super::test_fixtures::sample_quiz;
    use super::*;

    fn question() -> Question {
        Question {
            text: "What is the closest star to Earth?".into(),
            options: vec![
                "Proxima Centauri".into(),
                "The Sun".into(),
                "Sirius".into(),
                "Betelgeuse".into(),
            ],
            correct_index: 1,
            explanation: "The Sun is a star, about 8 light-minutes away.".into(),
        }
    }

    #[test]
    fn valid_question_passes() {
        assert!(question().validate().is_ok());
    }

    #[test]
    fn wrong_option_count_rejected() {
        let mut q = question();
        q.options.pop();
        let err = q.validate().unwrap_err();
        assert!(matches!(err, QuizError::Generation(_)));

        q.options.push("Vega".into());
        q.options.push("Altair".into());
        assert!(q.validate().is_err());
    }

    #[test]
    fn out_of_range_correct_index_rejected() {
        let mut q = question();
        q.correct_index = 4;
        assert!(matches!(
            q.validate().unwrap_err(),
            QuizError::Generation(_)
        ));
    }

    #[test]
    fn duplicate_options_rejected() {
        let mut q = question();
        q.options[3] = q.options[0].clone();
        assert!(matches!(
            q.validate().unwrap_err(),
            QuizError::Generation(_)
        ));
    }

    #[test]
    fn quiz_requires_exact_question_count() {
        let quiz = sample_quiz();
        assert_eq!(quiz.len(), QUESTION_COUNT);

        let mut questions: Vec<Question> = quiz.questions().to_vec();
        questions.pop();
        assert!(matches!(
            Quiz::new(questions).unwrap_err(),
            QuizError::Generation(_)
        ));
    }

    #[test]
    fn quiz_rejects_any_malformed_question() {
        let mut questions: Vec<Question> = sample_quiz().questions().to_vec();
        questions[7].correct_index = 9;
        assert!(Quiz::new(questions).is_err());
    }

    #[test]
    fn attempt_percentage() {
        let attempt = Attempt::new("Space", 7, 10);
        assert!((attempt.percentage() - 70.0).abs() < f64::EPSILON);
        assert_eq!(Attempt::new("Space", 0, 0).percentage(), 0.0);
    }

    #[test]
    fn attempt_serde_roundtrip() {
        let attempt = Attempt::new("Space", 7, 10);
        let json = serde_json::to_string(&attempt).unwrap();
        let back: Attempt = serde_json::from_str(&json).unwrap();
        assert_eq!(back, attempt);
    }
}
