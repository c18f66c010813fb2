//! Source error types.

use thiserror::Error;

/// Errors that can occur while fetching questions.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The API returned an HTTP error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// Not enough questions match the requested filters.
    #[error("no results: the trivia API has fewer than {0} matching questions")]
    NoResults(u32),

    /// The API rejected a request parameter.
    #[error("invalid parameter in request")]
    InvalidParameter,

    /// The session token does not exist.
    #[error("session token not found")]
    TokenNotFound,

    /// The session token has returned every available question.
    #[error("session token exhausted")]
    TokenEmpty,

    /// Too many requests from this address.
    #[error("rate limited by the trivia API")]
    RateLimited,

    /// A question in the response could not be used.
    #[error("malformed question at position {index}: {reason}")]
    MalformedQuestion { index: usize, reason: String },
}
