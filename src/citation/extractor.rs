use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use super::error::ExtractionError;
use super::pattern::PatternExtractor;
use super::structured::StructuredExtractor;
use super::types::{Citation, CitationKind, dedupe_preserving_order};

/// Which recognizer a [`CitationExtractor`] runs first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionStrategy {
    /// Tokenizing recognizer with pattern fallback.
    #[default]
    Structured,
    /// Regular expressions only.
    Pattern,
}

impl ExtractionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStrategy::Structured => "structured",
            ExtractionStrategy::Pattern => "pattern",
        }
    }
}

impl fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "structured" | "tokenizer" => Ok(Self::Structured),
            "pattern" | "regex" => Ok(Self::Pattern),
            _ => Err(format!("Unknown extraction strategy: {}", s)),
        }
    }
}

/// Extracts an ordered, duplicate-free list of citations from brief text.
#[derive(Debug, Clone, Default)]
pub struct CitationExtractor {
    strategy: ExtractionStrategy,
    structured: StructuredExtractor,
    pattern: PatternExtractor,
}

impl CitationExtractor {
    pub fn new(strategy: ExtractionStrategy) -> Self {
        Self {
            strategy,
            structured: StructuredExtractor::new(),
            pattern: PatternExtractor::new(),
        }
    }

    /// Uses `structured` as the primary recognizer.
    pub fn with_structured(structured: StructuredExtractor) -> Self {
        Self {
            strategy: ExtractionStrategy::Structured,
            structured,
            pattern: PatternExtractor::new(),
        }
    }

    pub fn strategy(&self) -> ExtractionStrategy {
        self.strategy
    }

    /// Extracts citations in first-seen order.
    ///
    /// Fails only for blank input. An empty result is not an error.
    pub fn extract(&self, text: &str) -> Result<Vec<Citation>, ExtractionError> {
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyText);
        }

        let (matches, used) = match self.strategy {
            ExtractionStrategy::Structured => match self.structured.extract_matches(text) {
                Ok(matches) => (matches, ExtractionStrategy::Structured),
                Err(e) => {
                    warn!(error = %e, "Structured extraction failed, falling back to patterns");
                    (self.pattern.extract_matches(text), ExtractionStrategy::Pattern)
                }
            },
            ExtractionStrategy::Pattern => {
                (self.pattern.extract_matches(text), ExtractionStrategy::Pattern)
            }
        };

        let case_names = matches
            .iter()
            .filter(|m| m.kind == CitationKind::CaseName)
            .count();
        let citations = dedupe_preserving_order(matches);
        debug!(
            count = citations.len(),
            case_names,
            strategy = %used,
            "Extracted unique citations"
        );
        Ok(citations)
    }
}
