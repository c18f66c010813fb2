//! The `calibra init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    let path = std::path::Path::new("calibra.toml");
    if path.exists() {
        println!("calibra.toml already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG)?;
        println!("Created calibra.toml");
    }

    println!("\nNext steps:");
    println!("  1. Adjust question_count, category or difficulty in calibra.toml");
    println!("  2. Run: calibra take");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# calibra configuration

# Questions per quiz.
question_count = 10

# Restrict to one Open Trivia DB category id (e.g. 9 = General Knowledge).
# category = 9

# Restrict difficulty: "easy", "medium" or "hard".
# difficulty = "medium"

[source]
base_url = "https://opentdb.com"
timeout_secs = 30
"#;
