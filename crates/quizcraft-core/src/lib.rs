//! quizcraft-core — Quiz model, session state machine, scoring, and ledger.
//!
//! This crate defines the fundamental data model, the trait seams, and the
//! session workflow that the entire quizcraft system builds on.

pub mod engine;
pub mod error;
pub mod ledger;
pub mod model;
pub mod scoring;
pub mod session;
pub mod stats;
pub mod traits;

pub use engine::{SessionEngine, SubmitOutcome};
pub use error::{user_message, QuizError};
pub use ledger::{Ledger, MemoryStore};
pub use model::{Attempt, Question, Quiz, UserHistory, OPTION_COUNT, QUESTION_COUNT};
pub use scoring::{score, QuestionFeedback, ScoreCard};
pub use session::{QuizSession, SessionPhase};
