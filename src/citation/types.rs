use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::SYNTHETIC_CITATION_PREVIEW_CHARS;

/// Normalized citation string (e.g. `"410 U.S. 113"` or `"Roe v. Wade"`).
///
/// Equality is exact string equality on the normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Citation(String);

impl Citation {
    /// Creates a citation, trimming surrounding whitespace.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.len() == value.len() {
            Self(value)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Builds the stand-in citation used when a document yields no citations:
    /// the first [`SYNTHETIC_CITATION_PREVIEW_CHARS`] characters of the text.
    ///
    /// Returns `None` for blank text.
    pub fn synthetic(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let preview: String = trimmed
            .chars()
            .take(SYNTHETIC_CITATION_PREVIEW_CHARS)
            .collect();
        Some(Self::new(preview))
    }

    /// Returns the citation text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the citation and returns the inner string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns `true` if the citation is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Citation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Citation {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Citation {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Citation grammar a match was recognized by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationKind {
    /// United States Reports (`U.S.`).
    UsReports,
    /// Supreme Court Reporter (`S. Ct.`).
    SupremeCourtReporter,
    /// Lawyers' Edition (`L. Ed.`, `L. Ed. 2d`).
    LawyersEdition,
    /// Federal Reporter (`F.`, `F.2d`, `F.3d`, `F.4th`).
    FederalReporter,
    /// Federal Supplement (`F. Supp.`, `2d`, `3d`).
    FederalSupplement,
    /// Federal Appendix (`F. App'x`).
    FederalAppendix,
    /// Federal Rules Decisions (`F.R.D.`).
    FederalRulesDecisions,
    /// Bankruptcy Reporter (`B.R.`).
    BankruptcyReporter,
    /// Westlaw document number (`2016 WL 165971`).
    Westlaw,
    /// "Party v. Party" case name.
    CaseName,
}

/// A recognized citation and where it starts in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct CitationMatch {
    /// Normalized citation.
    pub citation: Citation,
    /// Grammar that produced the match.
    pub kind: CitationKind,
    /// Byte offset of the match in the source text.
    pub start: usize,
}

impl CitationMatch {
    pub fn new(citation: impl Into<Citation>, kind: CitationKind, start: usize) -> Self {
        Self {
            citation: citation.into(),
            kind,
            start,
        }
    }
}

/// Orders matches by position and drops repeats, keeping each citation's first occurrence.
pub fn dedupe_preserving_order(mut matches: Vec<CitationMatch>) -> Vec<Citation> {
    matches.sort_by_key(|m| m.start);

    let mut seen = HashSet::with_capacity(matches.len());
    matches
        .into_iter()
        .filter(|m| !m.citation.is_empty())
        .filter(|m| seen.insert(m.citation.clone()))
        .map(|m| m.citation)
        .collect()
}
