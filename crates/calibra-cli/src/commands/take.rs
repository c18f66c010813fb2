//! The `calibra take` command: the interactive quiz.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use calibra_core::model::{Confidence, Question};
use calibra_core::session::QuizSession;
use calibra_core::tips::{tip_for, STRATEGY_TIPS};
use calibra_core::traits::{FetchRequest, QuestionSource};
use calibra_source::config::load_config_from;
use calibra_source::create_source;

use crate::render::write_summary;

const WELCOME: &str = "Welcome to the Calibrated Probability Assessment Quiz!";

const ABOUT: &str = "\
This quiz will help you assess how well you can predict the correct answer
and how confident you are in your predictions. Calibrated probability
assessments improve subjective estimates by comparing them against real
outcomes, which matters wherever risk has to be judged under uncertainty.";

const GOAL: &str = "\
Your goal is to have your confidence and % correct converge regardless of
actual subject-matter knowledge.";

/// Flags for `calibra take`.
pub struct TakeOptions {
    pub amount: Option<u32>,
    pub category: Option<u32>,
    pub difficulty: Option<String>,
    pub source_url: Option<String>,
    pub skip_intro: bool,
    pub config: Option<PathBuf>,
}

pub async fn execute(options: TakeOptions) -> Result<()> {
    let mut config = load_config_from(options.config.as_deref())?;

    if let Some(url) = options.source_url {
        config.source.base_url = url;
    }
    if let Some(amount) = options.amount {
        anyhow::ensure!(amount >= 1, "amount must be at least 1");
        config.question_count = amount;
    }
    if options.category.is_some() {
        config.category = options.category;
    }
    if let Some(difficulty) = &options.difficulty {
        config.difficulty = Some(difficulty.parse()?);
    }

    let source = create_source(&config.source)?;
    let request = config.fetch_request();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(
        source.as_ref(),
        &request,
        options.skip_intro,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )
    .await
}

/// Play sessions until the user declines a retake.
pub async fn run(
    source: &dyn QuestionSource,
    request: &FetchRequest,
    skip_intro: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let mut session = QuizSession::new();

    loop {
        if !skip_intro {
            write_intro(out, request.amount)?;
            prompt(input, out, "Press Enter to start the quiz.")?;
        }

        writeln!(out, "Loading questions...")?;
        out.flush()?;
        session
            .begin(source, request)
            .await
            .context("could not load questions")?;

        play(&mut session, input, out)?;

        let summary = session.submit()?;
        writeln!(out)?;
        write_summary(out, &summary)?;
        if let Some(finished) = session.completed_at() {
            writeln!(
                out,
                "\nSession {} finished at {}",
                session.id(),
                finished.format("%Y-%m-%d %H:%M:%S UTC")
            )?;
        }

        let again = prompt(input, out, "\nRetake the quiz? [y/N]: ")?;
        if !matches!(
            again.as_deref().map(str::trim),
            Some("y") | Some("Y") | Some("yes")
        ) {
            break;
        }
        session.restart();
    }

    Ok(())
}

fn write_intro(out: &mut impl Write, amount: u32) -> Result<()> {
    writeln!(out, "{WELCOME}\n")?;
    writeln!(out, "{ABOUT}\n")?;
    writeln!(out, "Instructions")?;
    writeln!(
        out,
        "You will be presented with {amount} true or false questions. For each question,\n\
         select an answer and indicate your confidence in your choice. Once you have\n\
         answered all the questions, you will receive your results.\n"
    )?;
    writeln!(out, "{GOAL}\n")?;
    writeln!(out, "Strategies")?;
    for tip in &STRATEGY_TIPS {
        writeln!(out, "  * {tip}")?;
    }
    writeln!(out)?;
    Ok(())
}

/// Print `text`, read one line. `None` on end of input.
fn prompt(input: &mut impl BufRead, out: &mut impl Write, text: &str) -> Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn required(line: Option<String>) -> Result<String> {
    line.ok_or_else(|| anyhow::anyhow!("input ended before the quiz was finished"))
}

fn parse_truth(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "t" | "true" => Some(true),
        "f" | "false" => Some(false),
        _ => None,
    }
}

fn play(session: &mut QuizSession, input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
    let questions: Vec<Question> = session.questions().to_vec();
    let total = questions.len();

    for question in &questions {
        writeln!(out)?;
        let mut meta = question.category.clone();
        if let Some(difficulty) = question.difficulty {
            meta = format!("{meta}, {difficulty}");
        }
        writeln!(
            out,
            "{}. {}  [{} of {total}; {meta}]",
            question.id.index() + 1,
            question.text,
            question.id.index() + 1
        )?;

        loop {
            let line = required(prompt(input, out, "Answer (t/f, ? for a tip): ")?)?;
            if line == "?" {
                writeln!(out, "  Tip: {}", tip_for(question.id.index()))?;
                continue;
            }
            match parse_truth(&line) {
                Some(value) => {
                    session.answer(question.id, value)?;
                    break;
                }
                None => writeln!(out, "  Please answer t (true) or f (false).")?,
            }
        }

        loop {
            let current = session
                .answer_for(question.id)
                .map(|a| a.confidence)
                .unwrap_or_default();
            let text = format!("Confidence 50-100 in steps of 10 (Enter for {current}): ");
            let line = required(prompt(input, out, &text)?)?;
            if line.is_empty() {
                break;
            }
            match line.parse::<Confidence>() {
                Ok(confidence) => {
                    session.set_confidence(question.id, confidence)?;
                    break;
                }
                Err(e) => writeln!(out, "  {e}")?,
            }
        }
    }

    tracing::debug!(questions = total, "all questions answered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use calibra_source::mock::MockSource;

    fn source() -> MockSource {
        MockSource::from_pairs(&[
            ("Rust 1.0 was released in 2015.", true),
            ("The Pacific is the smallest ocean.", false),
        ])
    }

    fn request() -> FetchRequest {
        FetchRequest {
            amount: 2,
            ..Default::default()
        }
    }

    async fn play_script(source: &MockSource, script: &str, skip_intro: bool) -> Result<String> {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        run(source, &request(), skip_intro, &mut input, &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn plays_a_full_quiz() {
        let source = source();
        // Q1 true @ 90 (correct), Q2 true @ default 50 (wrong), no retake.
        let out = play_script(&source, "t\n90\nt\n\nn\n", true).await.unwrap();

        assert!(out.contains("1. Rust 1.0 was released in 2015."));
        assert!(out.contains("50.00% (1/2)"));
        assert!(out.contains("70.00%"));
        assert!(out.contains("90.00%"));
        assert!(out.contains("overconfident"));
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn reprompts_on_bad_input_and_shows_tips() {
        let source = source();
        let out = play_script(&source, "maybe\n?\nt\n55\n100\nf\n60\n", true)
            .await
            .unwrap();

        assert!(out.contains("Please answer t (true) or f (false)."));
        assert!(out.contains("Tip: Decomposition"));
        assert!(out.contains("invalid confidence '55'"));
        assert!(out.contains("100.00% (2/2)"));
        assert!(out.contains("underconfident"));
    }

    #[tokio::test]
    async fn retake_fetches_a_fresh_set() {
        let source = source();
        let out = play_script(&source, "t\n\nf\n\ny\nf\n\nt\n\n\n", true)
            .await
            .unwrap();

        assert_eq!(source.call_count(), 2);
        assert!(out.contains("100.00% (2/2)"));
        assert!(out.contains("0.00% (0/2)"));
    }

    #[tokio::test]
    async fn intro_waits_for_enter() {
        let source = source();
        let out = play_script(&source, "\nt\n\nf\n\n", false).await.unwrap();
        assert!(out.contains(WELCOME));
        assert!(out.contains("You will be presented with 2 true or false questions."));
        assert!(out.contains("Seeking Disconfirming Evidence"));
    }

    #[tokio::test]
    async fn early_end_of_input_is_an_error() {
        let source = source();
        let err = play_script(&source, "t\n", true).await.unwrap_err();
        assert!(err.to_string().contains("input ended"));
    }

    #[tokio::test]
    async fn fetch_failure_is_reported() {
        let source = MockSource::failing("connection refused");
        let err = play_script(&source, "", true).await.unwrap_err();
        assert!(format!("{err:#}").contains("connection refused"));
    }

    #[test]
    fn truth_parsing() {
        assert_eq!(parse_truth("T"), Some(true));
        assert_eq!(parse_truth("false"), Some(false));
        assert_eq!(parse_truth("yes"), None);
    }
}
