//! Calibration scoring.
//!
//! Turns a completed answer set into four percentages: accuracy, mean stated
//! confidence, and mean confidence split by correct and wrong answers.
//! All arithmetic is done on exact integer ratios and rounded once, to two
//! decimals with ties rounded up.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{Answer, Question, QuestionId};

/// A percentage held in hundredths, e.g. `7143` is `71.43%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Percentage(u32);

impl Percentage {
    pub const ZERO: Percentage = Percentage(0);

    /// Round `numerator / denominator` (already in percent units) to two
    /// decimals, ties up. A zero denominator yields `0.00`.
    pub fn from_ratio(numerator: u64, denominator: u64) -> Self {
        if denominator == 0 {
            return Percentage::ZERO;
        }
        let hundredths = (200 * numerator + denominator) / (2 * denominator);
        Percentage(hundredths as u32)
    }

    pub fn from_hundredths(hundredths: u32) -> Self {
        Percentage(hundredths)
    }

    pub fn hundredths(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Percentage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid percentage: '{s}'");
        let trimmed = s.trim();
        let (whole, frac) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let whole: u32 = whole.parse().map_err(|_| invalid())?;
        let frac: u32 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u32>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };
        whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(frac))
            .map(Percentage)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for Percentage {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Percentage> for String {
    fn from(value: Percentage) -> Self {
        value.to_string()
    }
}

/// Aggregate accuracy-versus-confidence statistics for a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    /// Share of questions answered correctly.
    pub correct_percentage: Percentage,
    /// Mean stated confidence over all answers.
    pub average_confidence: Percentage,
    /// Mean stated confidence over correct answers (`0.00` if none).
    pub correct_confidence: Percentage,
    /// Mean stated confidence over wrong answers (`0.00` if none).
    pub wrong_confidence: Percentage,
    pub total_questions: usize,
    pub correct_count: usize,
    pub wrong_count: usize,
}

/// Score a completed quiz.
///
/// Every question must have a distinct id and an answer with a chosen truth
/// value; anything less is rejected rather than scored. Answers for ids that
/// are not in `questions` do not contribute.
pub fn score(
    questions: &[Question],
    answers: &HashMap<QuestionId, Answer>,
) -> Result<ResultSummary, QuizError> {
    if questions.is_empty() {
        return Err(QuizError::EmptyQuiz);
    }

    let mut seen = HashSet::with_capacity(questions.len());
    if let Some(dup) = questions.iter().find(|q| !seen.insert(q.id)) {
        return Err(QuizError::DuplicateQuestion(dup.id));
    }

    let mut correct_count: u64 = 0;
    let mut total_confidence: u64 = 0;
    let mut correct_confidence_sum: u64 = 0;
    let mut wrong_confidence_sum: u64 = 0;

    for question in questions {
        let answer = answers
            .get(&question.id)
            .ok_or(QuizError::Unanswered(question.id))?;
        let chosen = answer.answer.ok_or(QuizError::Unanswered(question.id))?;
        let confidence = u64::from(answer.confidence.percent());

        total_confidence += confidence;
        if question.is_correct(chosen) {
            correct_count += 1;
            correct_confidence_sum += confidence;
        } else {
            wrong_confidence_sum += confidence;
        }
    }

    let total = questions.len() as u64;
    let wrong_count = total - correct_count;

    Ok(ResultSummary {
        correct_percentage: Percentage::from_ratio(correct_count * 100, total),
        average_confidence: Percentage::from_ratio(total_confidence, total),
        correct_confidence: Percentage::from_ratio(correct_confidence_sum, correct_count),
        wrong_confidence: Percentage::from_ratio(wrong_confidence_sum, wrong_count),
        total_questions: questions.len(),
        correct_count: correct_count as usize,
        wrong_count: wrong_count as usize,
    })
}
