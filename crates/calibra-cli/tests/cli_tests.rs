//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn calibra() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("calibra").unwrap()
}

/// A command isolated from any user config.
fn isolated(dir: &TempDir) -> Command {
    let mut cmd = calibra();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("CALIBRA_SOURCE_URL");
    cmd
}

fn ten_question_sheet() -> serde_json::Value {
    // Seven correct answers at [50,60,70,80,90,100,50], three wrong at [50,90,100].
    let confidences = [50, 60, 70, 80, 90, 100, 50, 50, 90, 100];
    let questions: Vec<_> = (0..10)
        .map(|i| {
            serde_json::json!({
                "id": i,
                "text": format!("Question {i}"),
                "correct_answer": true,
                "category": "General Knowledge"
            })
        })
        .collect();
    let answers: Vec<_> = confidences
        .iter()
        .enumerate()
        .map(|(i, c)| serde_json::json!({"id": i, "answer": i < 7, "confidence": c}))
        .collect();
    serde_json::json!({"questions": questions, "answers": answers})
}

#[test]
fn tips_lists_all_strategies() {
    calibra()
        .arg("tips")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Decomposition"))
        .stdout(predicate::str::contains("8. Diverse Viewpoints"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created calibra.toml"));

    assert!(dir.path().join("calibra.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    isolated(&dir).arg("init").assert().success();

    isolated(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn score_sheet_text() {
    let dir = TempDir::new().unwrap();
    let sheet = dir.path().join("sheet.json");
    std::fs::write(&sheet, ten_question_sheet().to_string()).unwrap();

    calibra()
        .arg("score")
        .arg("--sheet")
        .arg(&sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains("70.00% (7/10)"))
        .stdout(predicate::str::contains("74.00%"))
        .stdout(predicate::str::contains("71.43%"))
        .stdout(predicate::str::contains("80.00%"))
        .stdout(predicate::str::contains("overconfident"));
}

#[test]
fn score_sheet_json() {
    let dir = TempDir::new().unwrap();
    let sheet = dir.path().join("sheet.json");
    std::fs::write(&sheet, ten_question_sheet().to_string()).unwrap();

    let output = calibra()
        .arg("score")
        .arg("--sheet")
        .arg(&sheet)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["correct_percentage"], "70.00");
    assert_eq!(json["average_confidence"], "74.00");
    assert_eq!(json["correct_confidence"], "71.43");
    assert_eq!(json["wrong_confidence"], "80.00");
    assert_eq!(json["calibration"], "overconfident");
}

#[test]
fn score_incomplete_sheet_fails() {
    let dir = TempDir::new().unwrap();
    let sheet = dir.path().join("sheet.json");
    let body = serde_json::json!({
        "questions": [
            {"id": 0, "text": "A", "correct_answer": true},
            {"id": 1, "text": "B", "correct_answer": false}
        ],
        "answers": [
            {"id": 0, "answer": true, "confidence": 60},
            {"id": 1, "confidence": 90}
        ]
    });
    std::fs::write(&sheet, body.to_string()).unwrap();

    calibra()
        .arg("score")
        .arg("--sheet")
        .arg(&sheet)
        .assert()
        .failure()
        .stderr(predicate::str::contains("question #2 has not been answered"));
}

#[test]
fn score_rejects_duplicate_question_ids() {
    let dir = TempDir::new().unwrap();
    let sheet = dir.path().join("sheet.json");
    let body = serde_json::json!({
        "questions": [
            {"id": 0, "text": "A", "correct_answer": true},
            {"id": 0, "text": "B", "correct_answer": false}
        ],
        "answers": [{"id": 0, "answer": true, "confidence": 90}]
    });
    std::fs::write(&sheet, body.to_string()).unwrap();

    calibra()
        .arg("score")
        .arg("--sheet")
        .arg(&sheet)
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate question id #1"));
}

#[test]
fn score_rejects_off_domain_confidence() {
    let dir = TempDir::new().unwrap();
    let sheet = dir.path().join("sheet.json");
    let body = serde_json::json!({
        "questions": [{"id": 0, "text": "A", "correct_answer": true}],
        "answers": [{"id": 0, "answer": true, "confidence": 75}]
    });
    std::fs::write(&sheet, body.to_string()).unwrap();

    calibra()
        .arg("score")
        .arg("--sheet")
        .arg(&sheet)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse answer sheet"));
}

#[test]
fn score_missing_file_fails() {
    calibra()
        .arg("score")
        .arg("--sheet")
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[tokio::test]
async fn take_against_trivia_api() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "response_code": 0,
        "results": [
            {
                "type": "boolean",
                "difficulty": "easy",
                "category": "Science &amp; Nature",
                "question": "Water boils at 100&deg;C at sea level.",
                "correct_answer": "True",
                "incorrect_answers": ["False"]
            },
            {
                "type": "boolean",
                "difficulty": "medium",
                "category": "History",
                "question": "The &quot;Hundred Years&#039; War&quot; lasted exactly 100 years.",
                "correct_answer": "False",
                "incorrect_answers": ["True"]
            }
        ]
    });
    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("amount", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("take")
        .arg("--amount")
        .arg("2")
        .arg("--source-url")
        .arg(server.uri())
        .arg("--skip-intro")
        .write_stdin("t\n100\nt\n80\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Water boils at 100°C at sea level."))
        .stdout(predicate::str::contains(
            "The \"Hundred Years' War\" lasted exactly 100 years.",
        ))
        .stdout(predicate::str::contains("50.00% (1/2)"))
        .stdout(predicate::str::contains("90.00%"))
        .stdout(predicate::str::contains("overconfident"));
}

#[test]
fn take_with_unreachable_source_fails() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("take")
        .arg("--source-url")
        .arg("http://127.0.0.1:9")
        .arg("--skip-intro")
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not load questions"));
}

#[test]
fn take_rejects_bad_difficulty() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("take")
        .arg("--difficulty")
        .arg("impossible")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid difficulty"));
}
