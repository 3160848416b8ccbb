//! Raw text extraction from uploaded documents.

pub mod error;
pub mod plain;
pub mod types;


use async_trait::async_trait;

pub use error::{DocumentError, DocumentResult};
pub use plain::PlainTextExtractor;
pub use types::{DocumentFormat, DocumentRef};

#[async_trait]
/// Turns an uploaded document into plain text.
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, document: &DocumentRef) -> DocumentResult<String>;
}
