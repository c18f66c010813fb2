//! The question source seam.
//!
//! Implemented by `calibra-source` for the Open Trivia DB and for tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, Question};

/// Default number of questions per quiz.
pub const DEFAULT_QUESTION_COUNT: u32 = 10;

/// A backend that supplies true/false questions for one session.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable source name (e.g. "opentdb").
    fn name(&self) -> &str;

    /// Fetch a fresh question set. Question ids are positions `0..n`.
    async fn fetch(&self, request: &FetchRequest) -> anyhow::Result<Vec<Question>>;
}

/// What to ask the source for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    /// Number of questions.
    pub amount: u32,
    /// Trivia category id, if restricted.
    #[serde(default)]
    pub category: Option<u32>,
    /// Difficulty filter, if restricted.
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self {
            amount: DEFAULT_QUESTION_COUNT,
            category: None,
            difficulty: None,
        }
    }
}
