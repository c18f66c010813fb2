//! The `calibra score` command.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use calibra_core::model::{Answer, Confidence, Question, QuestionId};
use calibra_core::{score, Calibration, ResultSummary};

use crate::render::write_summary;

/// A quiz and its answers, as read from disk.
#[derive(Debug, Deserialize)]
struct AnswerSheet {
    questions: Vec<Question>,
    #[serde(default)]
    answers: Vec<SheetAnswer>,
}

#[derive(Debug, Deserialize)]
struct SheetAnswer {
    id: QuestionId,
    #[serde(default)]
    answer: Option<bool>,
    #[serde(default)]
    confidence: Confidence,
}

#[derive(Serialize)]
struct ScoreOutput {
    #[serde(flatten)]
    summary: ResultSummary,
    calibration: Calibration,
}

fn load_sheet(path: &Path) -> Result<AnswerSheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer sheet: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answer sheet: {}", path.display()))
}

fn collect_answers(sheet: &AnswerSheet) -> Result<HashMap<QuestionId, Answer>> {
    let mut answers = HashMap::with_capacity(sheet.answers.len());
    for entry in &sheet.answers {
        let answer = Answer {
            answer: entry.answer,
            confidence: entry.confidence,
        };
        if answers.insert(entry.id, answer).is_some() {
            anyhow::bail!("question {} is answered more than once", entry.id);
        }
    }
    Ok(answers)
}

pub fn execute(sheet_path: PathBuf, format: String) -> Result<()> {
    let sheet = load_sheet(&sheet_path)?;
    let answers = collect_answers(&sheet)?;
    let summary = score(&sheet.questions, &answers).context("cannot score answer sheet")?;

    match format.as_str() {
        "json" => {
            let output = ScoreOutput {
                summary,
                calibration: Calibration::of(&summary),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            let stdout = std::io::stdout();
            write_summary(&mut stdout.lock(), &summary)?;
        }
    }

    Ok(())
}
