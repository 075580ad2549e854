//! Pure scoring engine.
//!
//! Maps a completed quiz plus a full answer vector to per-question verdicts
//! and an aggregate score. Deterministic and side-effect free: identical
//! input always yields identical output.

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{Question, Quiz};

/// Verdict for one answered question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionFeedback {
    /// The original question.
    pub question: Question,
    /// Index of the option the user selected.
    pub selected_index: usize,
    /// Text of the option the user selected.
    pub selected_option: String,
    /// Whether the selection matched the correct index.
    pub correct: bool,
    /// Text of the correct option, present only when the answer was wrong.
    pub correct_option: Option<String>,
    /// The question's explanation.
    pub explanation: String,
}

/// Aggregate result of scoring one quiz attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Count of correct verdicts.
    pub score: u32,
    /// Total number of questions.
    pub total: u32,
    /// One verdict per question, in quiz order.
    pub feedback: Vec<QuestionFeedback>,
}

/// Score a completed quiz.
///
/// Fails with [`QuizError::IncompleteAnswers`] if any slot is unset, and
/// with [`QuizError::Validation`] on a length mismatch or an out-of-range
/// option index.
pub fn score(quiz: &Quiz, answers: &[Option<usize>]) -> Result<ScoreCard, QuizError> {
    if answers.len() != quiz.len() {
        return Err(QuizError::Validation(format!(
            "answer vector has {} slots for {} questions",
            answers.len(),
            quiz.len()
        )));
    }

    let answered = answers.iter().filter(|a| a.is_some()).count();
    if answered < answers.len() {
        return Err(QuizError::IncompleteAnswers {
            answered,
            total: answers.len(),
        });
    }

    let mut feedback = Vec::with_capacity(quiz.len());
    let mut correct_count = 0u32;

    for (question, answer) in quiz.questions().iter().zip(answers) {
        let selected_index = answer.expect("checked above");
        let Some(selected_option) = question.options.get(selected_index) else {
            return Err(QuizError::Validation(format!(
                "option index {selected_index} is out of range"
            )));
        };

        let correct = selected_index == question.correct_index;
        if correct {
            correct_count += 1;
        }

        feedback.push(QuestionFeedback {
            question: question.clone(),
            selected_index,
            selected_option: selected_option.clone(),
            correct,
            correct_option: (!correct).then(|| question.options[question.correct_index].clone()),
            explanation: question.explanation.clone(),
        });
    }

    Ok(ScoreCard {
        score: correct_count,
        total: quiz.len() as u32,
        feedback,
    })
}
