//! Mock question source for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use calibra_core::model::{Question, QuestionId};
use calibra_core::traits::{FetchRequest, QuestionSource};

use crate::error::SourceError;

/// A question source that serves a fixed list, or always fails.
pub struct MockSource {
    questions: Vec<Question>,
    fail_with: Option<String>,
    call_count: AtomicU32,
    last_request: Mutex<Option<FetchRequest>>,
}

impl MockSource {
    /// Serve `questions` (truncated to the requested amount) on every fetch.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            fail_with: None,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Serve one question per `(text, truth)` pair.
    pub fn from_pairs(pairs: &[(&str, bool)]) -> Self {
        let questions = pairs
            .iter()
            .enumerate()
            .map(|(i, &(text, truth))| Question {
                id: QuestionId(i),
                text: text.to_string(),
                correct_answer: truth,
                category: "Mock".into(),
                difficulty: None,
            })
            .collect();
        Self::new(questions)
    }

    /// Fail every fetch with a network error carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            questions: Vec::new(),
            fail_with: Some(message.to_string()),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_request(&self) -> Option<FetchRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }
}

#[async_trait]
impl QuestionSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, request: &FetchRequest) -> anyhow::Result<Vec<Question>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        if let Some(message) = &self.fail_with {
            return Err(SourceError::NetworkError(message.clone()).into());
        }

        Ok(self
            .questions
            .iter()
            .take(request.amount as usize)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_requested_amount() {
        let source = MockSource::from_pairs(&[("a", true), ("b", false), ("c", true)]);
        let request = FetchRequest {
            amount: 2,
            ..Default::default()
        };

        let questions = source.fetch(&request).await.unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].text, "b");
        assert_eq!(source.call_count(), 1);
        assert_eq!(source.last_request(), Some(request));
    }

    #[tokio::test]
    async fn failing_source() {
        let source = MockSource::failing("connection refused");
        let err = source.fetch(&FetchRequest::default()).await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(source.call_count(), 1);
    }
}
