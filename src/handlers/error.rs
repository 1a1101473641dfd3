// src/handlers/error.rs
use std::fmt;
use warp::http::StatusCode;
use warp::reject::Reject;

use crate::error::PipelineError;

#[derive(Debug, Clone)]
pub struct ApiError {
    pub message: String,
    pub status: StatusCode,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        ApiError {
            message: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        let status = match &e {
            PipelineError::InvalidUserInput(_) | PipelineError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            PipelineError::SourceUnavailable(_) => StatusCode::BAD_GATEWAY,
            PipelineError::MalformedRecord { .. }
            | PipelineError::EmptySeries
            | PipelineError::InsufficientData => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError {
            message: e.to_string(),
            status,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}
impl Reject for ApiError {}
