//! Configuration loading and the source factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use calibra_core::model::Difficulty;
use calibra_core::traits::{FetchRequest, QuestionSource, DEFAULT_QUESTION_COUNT};

use crate::opentdb::{OpenTdbSource, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Where questions are fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the trivia API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_question_count() -> u32 {
    DEFAULT_QUESTION_COUNT
}

/// Top-level calibra configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibraConfig {
    #[serde(default)]
    pub source: SourceConfig,
    /// Questions per quiz.
    #[serde(default = "default_question_count")]
    pub question_count: u32,
    /// Trivia category id to restrict to.
    #[serde(default)]
    pub category: Option<u32>,
    /// Difficulty to restrict to.
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

impl Default for CalibraConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            question_count: default_question_count(),
            category: None,
            difficulty: None,
        }
    }
}

impl CalibraConfig {
    /// The fetch request these settings describe.
    pub fn fetch_request(&self) -> FetchRequest {
        FetchRequest {
            amount: self.question_count,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `calibra.toml` in the current directory
/// 2. `~/.config/calibra/config.toml`
///
/// `CALIBRA_SOURCE_URL` overrides the configured source URL.
pub fn load_config() -> Result<CalibraConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<CalibraConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("calibra.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<CalibraConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => CalibraConfig::default(),
    };

    if let Ok(url) = std::env::var("CALIBRA_SOURCE_URL") {
        config.source.base_url = url;
    }
    config.source.base_url = resolve_env_vars(&config.source.base_url);

    anyhow::ensure!(
        config.question_count >= 1,
        "question_count must be at least 1"
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("calibra"))
}

/// Create a question source from its configuration.
pub fn create_source(config: &SourceConfig) -> Result<Box<dyn QuestionSource>> {
    let source = OpenTdbSource::new(&config.base_url, config.timeout_secs)
        .context("failed to create trivia source")?;
    Ok(Box::new(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_CALIBRA_TEST_VAR", "trivia.local");
        assert_eq!(resolve_env_vars("${_CALIBRA_TEST_VAR}"), "trivia.local");
        assert_eq!(
            resolve_env_vars("http://${_CALIBRA_TEST_VAR}:8080"),
            "http://trivia.local:8080"
        );
        assert_eq!(resolve_env_vars("${UNCLOSED"), "${UNCLOSED");
        std::env::remove_var("_CALIBRA_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_values() {
        std::env::set_var("_CALIBRA_SELF_REF", "${_CALIBRA_SELF_REF}/api");
        assert_eq!(
            resolve_env_vars("http://${_CALIBRA_SELF_REF}"),
            "http://${_CALIBRA_SELF_REF}/api"
        );
        std::env::remove_var("_CALIBRA_SELF_REF");
    }

    #[test]
    fn default_config() {
        let config = CalibraConfig::default();
        assert_eq!(config.source.base_url, "https://opentdb.com");
        assert_eq!(config.question_count, 10);
        assert_eq!(config.fetch_request(), FetchRequest::default());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
question_count = 20
category = 9
difficulty = "medium"

[source]
base_url = "http://localhost:8080"
timeout_secs = 5
"#;
        let config: CalibraConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.question_count, 20);
        assert_eq!(config.source.timeout_secs, 5);
        let request = config.fetch_request();
        assert_eq!(request.category, Some(9));
        assert_eq!(request.difficulty, Some(Difficulty::Medium));
    }

    #[test]
    fn load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calibra.toml");
        std::fs::write(&path, "question_count = 5\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.question_count, 5);
        assert_eq!(config.source.timeout_secs, 30);
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/calibra.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn zero_questions_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calibra.toml");
        std::fs::write(&path, "question_count = 0\n").unwrap();
        assert!(load_config_from(Some(&path)).is_err());
    }

    #[test]
    fn factory_builds_opentdb() {
        let source = create_source(&SourceConfig::default()).unwrap();
        assert_eq!(source.name(), "opentdb");
    }
}
