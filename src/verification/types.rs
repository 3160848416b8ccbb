use std::fmt;

use serde::{Deserialize, Serialize};

use crate::citation::Citation;

/// How a [`VerificationResult`] was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMethod {
    /// The authoritative database has no such case.
    Api,
    /// Self-consistency of generated summaries.
    SummaryComparison,
    /// No usable summaries were produced.
    SummaryComparisonFailed,
    /// The summary generator failed.
    SummaryGenerationFailed,
    /// Summaries could not be compared.
    SimilarityCalculationFailed,
    /// The check could not run at all.
    CheckFailed,
}

impl VerificationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationMethod::Api => "api",
            VerificationMethod::SummaryComparison => "summary_comparison",
            VerificationMethod::SummaryComparisonFailed => "summary_comparison_failed",
            VerificationMethod::SummaryGenerationFailed => "summary_generation_failed",
            VerificationMethod::SimilarityCalculationFailed => "similarity_calculation_failed",
            VerificationMethod::CheckFailed => "check_failed",
        }
    }

    /// Returns `true` for the methods that name a failing stage.
    pub fn is_failure(&self) -> bool {
        !matches!(
            self,
            VerificationMethod::Api | VerificationMethod::SummaryComparison
        )
    }
}

impl fmt::Display for VerificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-citation verification state.
///
/// `Pending → AuthoritativeChecked → NeedsConsistencyCheck → ConfirmedReal |
/// ConfirmedHallucinated`; the lookup may also end the check early with
/// `ConfirmedHallucinated`, and any failure ends it in `CheckFailed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationState {
    Pending,
    AuthoritativeChecked,
    NeedsConsistencyCheck,
    ConfirmedReal,
    ConfirmedHallucinated,
    CheckFailed,
}

impl VerificationState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            VerificationState::ConfirmedReal
                | VerificationState::ConfirmedHallucinated
                | VerificationState::CheckFailed
        )
    }
}

/// Immutable outcome of verifying one citation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub citation: Citation,
    pub is_hallucinated: bool,
    /// In `[0, 1]`.
    pub confidence: f64,
    pub method: VerificationMethod,
    /// Average pairwise summary similarity, when it was computed.
    pub similarity_score: Option<f64>,
    /// Usable summaries, in request order.
    pub summaries: Vec<String>,
    pub error: Option<String>,
}

impl VerificationResult {
    /// The authoritative database reported the citation as nonexistent.
    pub fn not_found(citation: Citation) -> Self {
        Self {
            citation,
            is_hallucinated: true,
            confidence: 1.0,
            method: VerificationMethod::Api,
            similarity_score: None,
            summaries: Vec::new(),
            error: None,
        }
    }

    /// Outcome of a completed self-consistency check.
    pub fn compared(
        citation: Citation,
        similarity: f64,
        threshold: f64,
        summaries: Vec<String>,
    ) -> Self {
        Self {
            citation,
            is_hallucinated: similarity < threshold,
            confidence: confidence(similarity, threshold),
            method: VerificationMethod::SummaryComparison,
            similarity_score: Some(similarity),
            summaries,
            error: None,
        }
    }

    /// Degraded result: not flagged, zero confidence, failing stage named.
    pub fn failed(
        citation: Citation,
        method: VerificationMethod,
        error: Option<String>,
        summaries: Vec<String>,
    ) -> Self {
        Self {
            citation,
            is_hallucinated: false,
            confidence: 0.0,
            method,
            similarity_score: None,
            summaries,
            error,
        }
    }

    /// Terminal state this result represents.
    pub fn state(&self) -> VerificationState {
        if self.method.is_failure() {
            VerificationState::CheckFailed
        } else if self.is_hallucinated {
            VerificationState::ConfirmedHallucinated
        } else {
            VerificationState::ConfirmedReal
        }
    }
}

/// `min(1, 2 · |similarity − threshold| / max(threshold, 1 − threshold, ε))`.
pub fn confidence(similarity: f64, threshold: f64) -> f64 {
    let denominator = threshold
        .max(1.0 - threshold)
        .max(crate::constants::CONFIDENCE_EPSILON);
    (2.0 * (similarity - threshold).abs() / denominator).min(1.0)
}
