//! Over/underconfidence classification and the feedback shown with results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scoring::{Percentage, ResultSummary};

const OVERCONFIDENT_FEEDBACK: [&str; 3] = [
    "Your stated confidence ran ahead of your accuracy.",
    "Before committing to 90% or 100%, name one concrete way the answer could be wrong.",
    "Try treating each pick as a bet: would you still take it at the odds you stated?",
];

const UNDERCONFIDENT_FEEDBACK: [&str; 3] = [
    "You were right more often than your stated confidence suggested.",
    "When an answer feels familiar, it is fine to move up from 50% in bigger steps.",
    "Keep a record of your picks; seeing past hit rates makes it easier to trust them.",
];

/// How stated confidence compares to actual accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Calibration {
    Overconfident,
    Underconfident,
}

impl Calibration {
    /// Overconfident iff mean confidence is strictly above accuracy.
    pub fn classify(average_confidence: Percentage, correct_percentage: Percentage) -> Self {
        if average_confidence > correct_percentage {
            Calibration::Overconfident
        } else {
            Calibration::Underconfident
        }
    }

    pub fn of(summary: &ResultSummary) -> Self {
        Self::classify(summary.average_confidence, summary.correct_percentage)
    }

    /// Fixed feedback lines for this classification.
    pub fn feedback(self) -> &'static [&'static str] {
        match self {
            Calibration::Overconfident => &OVERCONFIDENT_FEEDBACK,
            Calibration::Underconfident => &UNDERCONFIDENT_FEEDBACK,
        }
    }

    /// Mean confidence minus accuracy, in percentage points.
    pub fn gap(summary: &ResultSummary) -> f64 {
        let diff = i64::from(summary.average_confidence.hundredths())
            - i64::from(summary.correct_percentage.hundredths());
        diff as f64 / 100.0
    }
}

impl fmt::Display for Calibration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Calibration::Overconfident => write!(f, "overconfident"),
            Calibration::Underconfident => write!(f, "underconfident"),
        }
    }
}
