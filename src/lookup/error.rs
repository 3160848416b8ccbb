use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("citation cannot be empty")]
    EmptyCitation,

    #[error("lookup request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("lookup service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid lookup response: {0}")]
    InvalidResponse(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type LookupResult<T> = Result<T, LookupError>;
