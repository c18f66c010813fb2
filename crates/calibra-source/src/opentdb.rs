//! Open Trivia DB question source.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use calibra_core::model::{Difficulty, Question, QuestionId};
use calibra_core::traits::{FetchRequest, QuestionSource};

use crate::entities::decode_html_entities;
use crate::error::SourceError;

pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The public Open Trivia DB, restricted to true/false questions.
pub struct OpenTdbSource {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl OpenTdbSource {
    pub fn new(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SourceError::NetworkError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_url(&self, request: &FetchRequest) -> anyhow::Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&format!("{}/api.php", self.base_url))
            .map_err(|e| SourceError::NetworkError(format!("invalid base URL: {e}")))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("amount", &request.amount.to_string());
            query.append_pair("type", "boolean");
            if let Some(category) = request.category {
                query.append_pair("category", &category.to_string());
            }
            if let Some(difficulty) = request.difficulty {
                query.append_pair("difficulty", &difficulty.to_string());
            }
        }
        Ok(url)
    }
}

#[derive(Deserialize)]
struct OpenTdbResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<OpenTdbQuestion>,
}

#[derive(Deserialize)]
struct OpenTdbQuestion {
    #[serde(default)]
    category: String,
    #[serde(default)]
    difficulty: Option<String>,
    question: String,
    correct_answer: String,
}

fn check_response_code(code: u8, amount: u32) -> Result<(), SourceError> {
    match code {
        0 => Ok(()),
        1 => Err(SourceError::NoResults(amount)),
        2 => Err(SourceError::InvalidParameter),
        3 => Err(SourceError::TokenNotFound),
        4 => Err(SourceError::TokenEmpty),
        5 => Err(SourceError::RateLimited),
        other => Err(SourceError::ApiError {
            status: 200,
            message: format!("unexpected response_code {other}"),
        }),
    }
}

fn parse_truth(value: &str) -> Option<bool> {
    match value {
        "True" => Some(true),
        "False" => Some(false),
        _ => None,
    }
}

fn into_questions(results: Vec<OpenTdbQuestion>) -> Result<Vec<Question>, SourceError> {
    results
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let correct_answer =
                parse_truth(&raw.correct_answer).ok_or_else(|| SourceError::MalformedQuestion {
                    index,
                    reason: format!("correct_answer '{}' is not True/False", raw.correct_answer),
                })?;
            let text = decode_html_entities(&raw.question);
            if text.trim().is_empty() {
                return Err(SourceError::MalformedQuestion {
                    index,
                    reason: "empty question text".into(),
                });
            }
            Ok(Question {
                id: QuestionId(index),
                text,
                correct_answer,
                category: decode_html_entities(&raw.category),
                difficulty: raw.difficulty.and_then(|d| d.parse::<Difficulty>().ok()),
            })
        })
        .collect()
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    fn name(&self) -> &str {
        "opentdb"
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch(&self, request: &FetchRequest) -> anyhow::Result<Vec<Question>> {
        let url = self.request_url(request)?;

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(self.timeout_secs)
            } else {
                SourceError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status == 429 {
            return Err(SourceError::RateLimited.into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiError {
                status,
                message: body,
            }
            .into());
        }

        let api_response: OpenTdbResponse =
            response.json().await.map_err(|e| SourceError::ApiError {
                status,
                message: format!("failed to parse response: {e}"),
            })?;

        check_response_code(api_response.response_code, request.amount)?;
        let questions = into_questions(api_response.results)?;
        tracing::debug!(count = questions.len(), "fetched questions");
        Ok(questions)
    }
}
