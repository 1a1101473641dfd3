// src/error.rs
use thiserror::Error;

/// Failure taxonomy for a pipeline run. No variant is retried; every one
/// aborts the run and surfaces its message to the caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid user input: {0}")]
    InvalidUserInput(String),

    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("no usable records after filtering")]
    EmptySeries,

    #[error("insufficient data: trend extraction needs two records with a nonzero baseline")]
    InsufficientData,

    #[error("invalid projection input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for PipelineError {
    fn from(e: reqwest::Error) -> Self {
        PipelineError::SourceUnavailable(e.to_string())
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(e: std::io::Error) -> Self {
        PipelineError::SourceUnavailable(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
