use async_trait::async_trait;
use tracing::{debug, warn};

use super::TextExtractor;
use super::error::{DocumentError, DocumentResult};
use super::types::{DocumentFormat, DocumentRef};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decodes `.txt` uploads; PDF and Word documents are recognized but not decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// UTF-8 (BOM stripped), falling back to Latin-1 for any other byte sequence.
    pub fn decode(bytes: &[u8]) -> String {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(e) => {
                warn!(error = %e, "Document is not valid UTF-8, decoding as Latin-1");
                bytes.iter().map(|&b| char::from(b)).collect()
            }
        }
    }
}

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract_text(&self, document: &DocumentRef) -> DocumentResult<String> {
        let format = document.format()?;
        match format {
            DocumentFormat::Txt => {}
            DocumentFormat::Pdf | DocumentFormat::Docx => {
                return Err(DocumentError::FormatUnavailable {
                    format: format.as_str(),
                });
            }
        }

        let text = Self::decode(&document.bytes);
        if text.trim().is_empty() {
            return Err(DocumentError::Empty);
        }

        debug!(
            file_name = %document.file_name,
            bytes = document.len(),
            chars = text.chars().count(),
            "Extracted document text"
        );
        Ok(text)
    }
}
