use thiserror::Error;

use crate::citation::ExtractionError;
use crate::document::DocumentError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum JobError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("extraction failed: {0}")]
    ExtractionFailure(String),

    #[error("collaborator failure: {0}")]
    CollaboratorFailure(String),

    #[error("job not found: {0}")]
    NotFound(String),
}

impl From<ExtractionError> for JobError {
    fn from(e: ExtractionError) -> Self {
        match e {
            ExtractionError::EmptyText => JobError::InvalidInput(e.to_string()),
            ExtractionError::TokenBudgetExceeded { .. } => JobError::ExtractionFailure(e.to_string()),
        }
    }
}

impl From<DocumentError> for JobError {
    fn from(e: DocumentError) -> Self {
        match e {
            DocumentError::MissingFileName
            | DocumentError::UnsupportedFormat { .. }
            | DocumentError::Empty => JobError::InvalidInput(e.to_string()),
            DocumentError::FormatUnavailable { .. } => JobError::ExtractionFailure(e.to_string()),
        }
    }
}

pub type JobResult<T> = Result<T, JobError>;
