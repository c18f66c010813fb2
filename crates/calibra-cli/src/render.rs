//! Text rendering of quiz results.

use std::io::Write;

use anyhow::Result;
use comfy_table::{Cell, Table};

use calibra_core::{Calibration, ResultSummary};

pub fn summary_table(summary: &ResultSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Quiz Results", ""]);
    table.add_row(vec![
        Cell::new("Correct answers"),
        Cell::new(format!(
            "{}% ({}/{})",
            summary.correct_percentage, summary.correct_count, summary.total_questions
        )),
    ]);
    table.add_row(vec![
        Cell::new("Average confidence"),
        Cell::new(format!("{}%", summary.average_confidence)),
    ]);
    table.add_row(vec![
        Cell::new("Confidence for correct answers"),
        Cell::new(format!("{}%", summary.correct_confidence)),
    ]);
    table.add_row(vec![
        Cell::new("Confidence for wrong answers"),
        Cell::new(format!("{}%", summary.wrong_confidence)),
    ]);
    table
}

/// Result table followed by the feedback for the classification.
pub fn write_summary(out: &mut impl Write, summary: &ResultSummary) -> Result<()> {
    let calibration = Calibration::of(summary);
    writeln!(out, "{}", summary_table(summary))?;
    writeln!(
        out,
        "\nYou were {calibration} (confidence minus accuracy: {:+.2} points).",
        Calibration::gap(summary)
    )?;
    for line in calibration.feedback() {
        writeln!(out, "  - {line}")?;
    }
    Ok(())
}
