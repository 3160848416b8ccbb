use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("uploaded file has no name")]
    MissingFileName,

    #[error("unsupported file format: {extension}. Please upload a .docx, .pdf, or .txt file")]
    UnsupportedFormat { extension: String },

    #[error("{format} text extraction is not available in this build")]
    FormatUnavailable { format: &'static str },

    #[error("document contains no text")]
    Empty,
}

pub type DocumentResult<T> = Result<T, DocumentError>;
