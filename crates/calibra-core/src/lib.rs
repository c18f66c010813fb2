//! calibra-core — data model, calibration scoring, and quiz sessions.
//!
//! This crate defines the question/answer model, the scorer that turns a
//! completed answer set into accuracy-versus-confidence statistics, and the
//! session state machine the front ends drive.

pub mod error;
pub mod feedback;
pub mod model;
pub mod scoring;
pub mod session;
pub mod tips;
pub mod traits;

pub use error::QuizError;
pub use feedback::Calibration;
pub use model::{Answer, Confidence, Difficulty, Question, QuestionId};
pub use scoring::{score, Percentage, ResultSummary};
pub use session::{QuizSession, SessionState};
