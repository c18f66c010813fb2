//! The quiz session state machine.
//!
//! A session moves `NotStarted -> InProgress -> Completed` on explicit
//! start and submit actions. `restart` discards everything and returns to
//! `NotStarted` under a new session id.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::QuizError;
use crate::model::{Answer, Confidence, Question, QuestionId};
use crate::scoring::{score, ResultSummary};
use crate::traits::{FetchRequest, QuestionSource};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    InProgress,
    Completed,
}

impl SessionState {
    fn label(self) -> &'static str {
        match self {
            SessionState::NotStarted => "not started",
            SessionState::InProgress => "in progress",
            SessionState::Completed => "completed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One user's pass through a question set.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    state: SessionState,
    questions: Vec<Question>,
    answers: HashMap<QuestionId, Answer>,
    summary: Option<ResultSummary>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::NotStarted,
            questions: Vec::new(),
            answers: HashMap::new(),
            summary: None,
            started_at: None,
            completed_at: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &HashMap<QuestionId, Answer> {
        &self.answers
    }

    pub fn answer_for(&self, id: QuestionId) -> Option<&Answer> {
        self.answers.get(&id)
    }

    /// The result, once submitted.
    pub fn summary(&self) -> Option<&ResultSummary> {
        self.summary.as_ref()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    fn require(&self, expected: SessionState, action: &'static str) -> Result<(), QuizError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(QuizError::InvalidTransition {
                action,
                state: self.state.label(),
            })
        }
    }

    /// Begin the quiz with an already-fetched question set.
    ///
    /// Question ids must be their positions `0..n`.
    pub fn start(&mut self, questions: Vec<Question>) -> Result<(), QuizError> {
        self.require(SessionState::NotStarted, "start")?;
        if questions.is_empty() {
            return Err(QuizError::EmptyQuiz);
        }
        for (i, question) in questions.iter().enumerate() {
            if question.id.index() != i {
                return Err(QuizError::MisplacedQuestion {
                    expected: QuestionId(i),
                    found: question.id,
                });
            }
        }
        tracing::info!(session = %self.id, questions = questions.len(), "quiz started");
        self.questions = questions;
        self.state = SessionState::InProgress;
        self.started_at = Some(Utc::now());
        Ok(())
    }

    /// Fetch questions from `source` and start the quiz.
    ///
    /// A failed fetch is logged and returned; the session stays `NotStarted`.
    #[instrument(skip(self, source), fields(session = %self.id, source_name = source.name()))]
    pub async fn begin(
        &mut self,
        source: &dyn QuestionSource,
        request: &FetchRequest,
    ) -> anyhow::Result<()> {
        self.require(SessionState::NotStarted, "start")?;
        let questions = match source.fetch(request).await {
            Ok(questions) => questions,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch questions");
                return Err(e);
            }
        };
        self.start(questions)?;
        Ok(())
    }

    fn entry(&mut self, id: QuestionId) -> Result<&mut Answer, QuizError> {
        self.require(SessionState::InProgress, "answer")?;
        if id.index() >= self.questions.len() {
            return Err(QuizError::UnknownQuestion(id));
        }
        Ok(self.answers.entry(id).or_default())
    }

    /// Choose a truth value; confidence keeps its current value (50% if new).
    pub fn answer(&mut self, id: QuestionId, value: bool) -> Result<(), QuizError> {
        self.entry(id)?.answer = Some(value);
        Ok(())
    }

    /// Set the stated confidence; the truth value stays unset if not chosen.
    pub fn set_confidence(&mut self, id: QuestionId, confidence: Confidence) -> Result<(), QuizError> {
        self.entry(id)?.confidence = confidence;
        Ok(())
    }

    /// Every question has a chosen truth value.
    pub fn is_complete(&self) -> bool {
        !self.questions.is_empty()
            && self
                .questions
                .iter()
                .all(|q| self.answers.get(&q.id).is_some_and(Answer::is_answered))
    }

    /// Questions still missing a truth value, in order.
    pub fn unanswered(&self) -> Vec<QuestionId> {
        self.questions
            .iter()
            .filter(|q| !self.answers.get(&q.id).is_some_and(Answer::is_answered))
            .map(|q| q.id)
            .collect()
    }

    /// Score the quiz and move to `Completed`.
    pub fn submit(&mut self) -> Result<ResultSummary, QuizError> {
        self.require(SessionState::InProgress, "submit")?;
        if let Some(&first) = self.unanswered().first() {
            return Err(QuizError::Unanswered(first));
        }
        let summary = score(&self.questions, &self.answers)?;
        tracing::info!(
            session = %self.id,
            correct = %summary.correct_percentage,
            confidence = %summary.average_confidence,
            "quiz submitted"
        );
        self.summary = Some(summary);
        self.state = SessionState::Completed;
        self.completed_at = Some(Utc::now());
        Ok(summary)
    }

    /// Throw away all state and return to `NotStarted`.
    pub fn restart(&mut self) {
        tracing::debug!(session = %self.id, "session reset");
        *self = Self::new();
    }
}
