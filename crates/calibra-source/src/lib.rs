//! calibra-source — where quiz questions come from.
//!
//! Implements the `QuestionSource` trait for the Open Trivia DB and for
//! tests, and loads the calibra configuration that selects a source.

pub mod config;
pub mod entities;
pub mod error;
pub mod mock;
pub mod opentdb;

pub use config::{create_source, load_config, CalibraConfig, SourceConfig};
pub use error::SourceError;
