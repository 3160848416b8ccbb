use thiserror::Error;

/// Errors raised while extracting citations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Input text was empty or whitespace-only.
    #[error("input text cannot be empty")]
    EmptyText,

    /// The structured tokenizer refused the input.
    #[error("text has {tokens} tokens, structured extraction is limited to {limit}")]
    TokenBudgetExceeded {
        /// Tokens found in the input.
        tokens: usize,
        /// Configured limit.
        limit: usize,
    },
}
