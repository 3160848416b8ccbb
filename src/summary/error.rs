use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    #[error("no API key configured (set STRAINER_LLM_API_KEY)")]
    MissingApiKey,

    #[error("authentication failed with status {status}: {message}")]
    Authentication { status: u16, message: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("summary service returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("summary request failed: {0}")]
    Transport(String),

    #[error("invalid summary response: {0}")]
    InvalidResponse(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl SummaryError {
    /// Classifies a non-2xx reply.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SummaryError::Authentication {
                status: status.as_u16(),
                message,
            },
            StatusCode::TOO_MANY_REQUESTS => SummaryError::RateLimited(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                SummaryError::InvalidRequest(message)
            }
            _ => SummaryError::Status {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Returns `true` if repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            SummaryError::RateLimited(_)
            | SummaryError::Transport(_)
            | SummaryError::InvalidResponse(_) => true,
            SummaryError::Status { status, .. } => *status >= 500 || *status == 408,
            SummaryError::MissingApiKey
            | SummaryError::Authentication { .. }
            | SummaryError::InvalidRequest(_)
            | SummaryError::Config(_) => false,
        }
    }
}

impl From<reqwest::Error> for SummaryError {
    fn from(e: reqwest::Error) -> Self {
        SummaryError::Transport(e.to_string())
    }
}

pub type SummaryResult<T> = Result<T, SummaryError>;
