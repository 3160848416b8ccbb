//! Regex fallback recognizer.
//!
//! Patterns run in a fixed order; each match keeps its raw text (whitespace
//! collapsed). Case names are rebuilt as `"{left} v {right}"`.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::types::{CitationKind, CitationMatch};

static REPORTER_PATTERNS: LazyLock<Vec<(CitationKind, Regex)>> = LazyLock::new(|| {
    [
        (CitationKind::UsReports, r"\b\d{1,4}\s+U\.\s?S\.\s+\d{1,5}\b"),
        (
            CitationKind::SupremeCourtReporter,
            r"\b\d{1,4}\s+S\.\s?Ct\.\s+\d{1,5}\b",
        ),
        (
            CitationKind::LawyersEdition,
            r"\b\d{1,4}\s+L\.\s?Ed\.(?:\s?2d)?\s+\d{1,5}\b",
        ),
        (
            CitationKind::FederalSupplement,
            r"\b\d{1,4}\s+F\.\s?Supp\.(?:\s?[23]d)?\s+\d{1,5}\b",
        ),
        (
            CitationKind::FederalAppendix,
            r"\b\d{1,4}\s+F\.\s?App['\x{2019}]?x\s+\d{1,5}\b",
        ),
        (
            CitationKind::FederalReporter,
            r"\b\d{1,4}\s+F\.(?:\s?(?:2d|3d|4th))?\s+\d{1,5}\b",
        ),
        (
            CitationKind::FederalRulesDecisions,
            r"\b\d{1,4}\s+F\.R\.D\.\s+\d{1,5}\b",
        ),
        (
            CitationKind::BankruptcyReporter,
            r"\b\d{1,4}\s+B\.R\.\s+\d{1,5}\b",
        ),
        (CitationKind::Westlaw, r"\b(?:19|20)\d{2}\s+WL\s+\d{1,9}\b"),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("valid reporter pattern")))
    .collect()
});

static CASE_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-zA-Z]+(?:\s+[A-Z][a-zA-Z]+)*)\s+v\.?\s+([A-Z][a-zA-Z]+(?:\s+[A-Z][a-zA-Z]+)*)")
        .expect("valid case name pattern")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Ordered list of regular expressions for reporter citations and case names.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl PatternExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Returns every match with its byte offset. Never fails.
    pub fn extract_matches(&self, text: &str) -> Vec<CitationMatch> {
        let mut matches = Vec::new();

        for (kind, pattern) in REPORTER_PATTERNS.iter() {
            for m in pattern.find_iter(text) {
                let normalized = WHITESPACE.replace_all(m.as_str(), " ");
                matches.push(CitationMatch::new(normalized.into_owned(), *kind, m.start()));
            }
        }

        for caps in CASE_NAME_PATTERN.captures_iter(text) {
            let (Some(whole), Some(left), Some(right)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            let left = WHITESPACE.replace_all(left.as_str(), " ");
            let right = WHITESPACE.replace_all(right.as_str(), " ");
            matches.push(CitationMatch::new(
                format!("{left} v {right}"),
                CitationKind::CaseName,
                whole.start(),
            ));
        }

        debug!(matches = matches.len(), "Pattern extraction finished");
        matches
    }
}
