//! Quiz error types.
//!
//! These errors cover invalid input to the scorer and illegal moves through
//! the session state machine. Fetch failures live in `calibra-source`.

use thiserror::Error;

use crate::model::QuestionId;

/// Errors raised by the scorer and the quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// A quiz needs at least one question.
    #[error("quiz has no questions")]
    EmptyQuiz,

    /// A question has no answer (or only a confidence was chosen).
    #[error("question {0} has not been answered")]
    Unanswered(QuestionId),

    /// Two questions share an id.
    #[error("duplicate question id {0}")]
    DuplicateQuestion(QuestionId),

    /// A question's id does not match its position in the quiz.
    #[error("question {found} is at position {}", .expected.index() + 1)]
    MisplacedQuestion {
        expected: QuestionId,
        found: QuestionId,
    },

    /// The question id is not part of the current quiz.
    #[error("unknown question: {0}")]
    UnknownQuestion(QuestionId),

    /// The requested operation is not allowed in the current session state.
    #[error("cannot {action} while the quiz is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    /// Confidence outside the fixed 50..=100 step-10 domain.
    #[error("invalid confidence '{0}': expected one of 50, 60, 70, 80, 90, 100")]
    InvalidConfidence(String),

    /// Unrecognised difficulty name.
    #[error("invalid difficulty '{0}': expected easy, medium or hard")]
    InvalidDifficulty(String),
}
