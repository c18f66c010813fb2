//! Core data model types for calibra.
//!
//! Questions come from a [`QuestionSource`](crate::traits::QuestionSource);
//! answers are collected per question by the session and handed to the scorer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QuizError;

/// Stable position of a question within its session.
///
/// Answers are keyed by this id rather than by question text, so two
/// questions with identical wording never share an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub usize);

impl QuestionId {
    /// Zero-based position in the question list.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Shown to users, so one-based.
        write!(f, "#{}", self.0 + 1)
    }
}

/// A single true/false trivia question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Position within the session.
    pub id: QuestionId,
    /// Question text, already decoded from HTML entities.
    pub text: String,
    /// Ground truth.
    pub correct_answer: bool,
    /// Display-only category label.
    #[serde(default)]
    pub category: String,
    /// Display-only difficulty.
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

impl Question {
    /// Whether `answer` matches the ground truth.
    pub fn is_correct(&self, answer: bool) -> bool {
        self.correct_answer == answer
    }
}

/// Question difficulty as reported by the trivia API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(QuizError::InvalidDifficulty(other.to_string())),
        }
    }
}

/// Stated confidence in an answer, in steps of ten percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Confidence {
    #[default]
    Fifty,
    Sixty,
    Seventy,
    Eighty,
    Ninety,
    Hundred,
}

impl Confidence {
    /// The whole domain, ascending.
    pub const ALL: [Confidence; 6] = [
        Confidence::Fifty,
        Confidence::Sixty,
        Confidence::Seventy,
        Confidence::Eighty,
        Confidence::Ninety,
        Confidence::Hundred,
    ];

    /// The confidence as a whole percentage.
    pub fn percent(self) -> u8 {
        match self {
            Confidence::Fifty => 50,
            Confidence::Sixty => 60,
            Confidence::Seventy => 70,
            Confidence::Eighty => 80,
            Confidence::Ninety => 90,
            Confidence::Hundred => 100,
        }
    }
}

impl TryFrom<u8> for Confidence {
    type Error = QuizError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Confidence::ALL
            .into_iter()
            .find(|c| c.percent() == value)
            .ok_or_else(|| QuizError::InvalidConfidence(value.to_string()))
    }
}

impl From<Confidence> for u8 {
    fn from(value: Confidence) -> Self {
        value.percent()
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

impl FromStr for Confidence {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        digits
            .parse::<u8>()
            .ok()
            .and_then(|v| Confidence::try_from(v).ok())
            .ok_or_else(|| QuizError::InvalidConfidence(trimmed.to_string()))
    }
}

/// The user's response to one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Answer {
    /// Chosen truth value; `None` until the user picks one.
    #[serde(default)]
    pub answer: Option<bool>,
    /// Stated confidence; 50% until changed.
    #[serde(default)]
    pub confidence: Confidence,
}

impl Answer {
    pub fn new(answer: bool, confidence: Confidence) -> Self {
        Self {
            answer: Some(answer),
            confidence,
        }
    }

    /// Whether a truth value has been chosen.
    pub fn is_answered(&self) -> bool {
        self.answer.is_some()
    }
}
