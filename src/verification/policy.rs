use std::sync::Arc;

use tracing::{debug, warn};

use crate::citation::Citation;
use crate::constants::{iterations_in_range, threshold_in_range};
use crate::lookup::CitationLookup;
use crate::scoring::SimilarityScorer;
use crate::summary::{SummaryError, SummaryGenerator};

use super::types::{VerificationMethod, VerificationResult, VerificationState};

/// A verification result plus whether the external lookup service was contacted.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyOutcome {
    pub result: VerificationResult,
    /// `true` if the authoritative service was called (cache hits do not count).
    pub lookup_invoked: bool,
}

/// Decides whether one citation is real, hallucinated, or could not be checked.
#[derive(Clone)]
pub struct VerificationPolicy {
    lookup: Option<Arc<dyn CitationLookup>>,
    generator: Arc<dyn SummaryGenerator>,
    scorer: SimilarityScorer,
}

impl std::fmt::Debug for VerificationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationPolicy")
            .field("lookup", &self.lookup.as_ref().map(|l| l.name()))
            .field("generator", &self.generator.name())
            .field("scorer", &self.scorer)
            .finish()
    }
}

impl VerificationPolicy {
    /// `lookup = None` skips the authoritative stage.
    pub fn new(
        lookup: Option<Arc<dyn CitationLookup>>,
        generator: Arc<dyn SummaryGenerator>,
        scorer: SimilarityScorer,
    ) -> Self {
        Self {
            lookup,
            generator,
            scorer,
        }
    }

    pub fn has_lookup(&self) -> bool {
        self.lookup.is_some()
    }

    pub fn lookup_name(&self) -> Option<&'static str> {
        self.lookup.as_ref().map(|l| l.name())
    }

    pub fn generator_name(&self) -> &'static str {
        self.generator.name()
    }

    pub fn scorer(&self) -> &SimilarityScorer {
        &self.scorer
    }

    /// Runs the full check for `citation`. Never fails: every error becomes a
    /// degraded result naming the failing stage.
    pub async fn verify(&self, citation: &Citation, iterations: u32, threshold: f64) -> PolicyOutcome {
        let mut state = VerificationState::Pending;
        let mut lookup_invoked = false;

        if citation.is_empty() {
            return Self::finish(
                citation,
                &mut state,
                VerificationResult::failed(
                    citation.clone(),
                    VerificationMethod::CheckFailed,
                    Some("citation cannot be empty".to_string()),
                    Vec::new(),
                ),
                lookup_invoked,
            );
        }
        if !iterations_in_range(iterations) || !threshold_in_range(threshold) {
            return Self::finish(
                citation,
                &mut state,
                VerificationResult::failed(
                    citation.clone(),
                    VerificationMethod::CheckFailed,
                    Some(format!(
                        "invalid parameters: iterations={iterations}, threshold={threshold}"
                    )),
                    Vec::new(),
                ),
                lookup_invoked,
            );
        }

        if let Some(lookup) = &self.lookup {
            match lookup.lookup(citation).await {
                Ok(outcome) => {
                    lookup_invoked = !outcome.cached;
                    Self::transition(citation, &mut state, VerificationState::AuthoritativeChecked);
                    if !outcome.found {
                        return Self::finish(
                            citation,
                            &mut state,
                            VerificationResult::not_found(citation.clone()),
                            lookup_invoked,
                        );
                    }
                }
                Err(e) => {
                    lookup_invoked = true;
                    warn!(
                        citation = %citation,
                        error = %e,
                        "Authoritative lookup failed, proceeding with summary comparison"
                    );
                }
            }
        }

        Self::transition(citation, &mut state, VerificationState::NeedsConsistencyCheck);

        let summaries = match self.collect_summaries(citation, iterations).await {
            Ok(summaries) => summaries,
            Err(e) => {
                return Self::finish(
                    citation,
                    &mut state,
                    VerificationResult::failed(
                        citation.clone(),
                        VerificationMethod::SummaryGenerationFailed,
                        Some(e.to_string()),
                        Vec::new(),
                    ),
                    lookup_invoked,
                );
            }
        };

        if summaries.is_empty() {
            warn!(citation = %citation, "No usable summaries generated");
            return Self::finish(
                citation,
                &mut state,
                VerificationResult::failed(
                    citation.clone(),
                    VerificationMethod::SummaryComparisonFailed,
                    None,
                    Vec::new(),
                ),
                lookup_invoked,
            );
        }

        let result = match self.scorer.average_similarity(&summaries) {
            Ok(similarity) => {
                VerificationResult::compared(citation.clone(), similarity, threshold, summaries)
            }
            Err(e) => VerificationResult::failed(
                citation.clone(),
                VerificationMethod::SimilarityCalculationFailed,
                Some(e.to_string()),
                summaries,
            ),
        };

        Self::finish(citation, &mut state, result, lookup_invoked)
    }

    /// Requests `iterations` summaries in order, dropping blank ones.
    async fn collect_summaries(
        &self,
        citation: &Citation,
        iterations: u32,
    ) -> Result<Vec<String>, SummaryError> {
        let mut summaries = Vec::with_capacity(iterations as usize);
        for _ in 0..iterations {
            let summary = self.generator.generate(citation).await?;
            if summary.trim().is_empty() {
                debug!(citation = %citation, "Discarding blank summary");
                continue;
            }
            summaries.push(summary);
        }
        Ok(summaries)
    }

    fn transition(citation: &Citation, state: &mut VerificationState, next: VerificationState) {
        debug!(citation = %citation, from = ?*state, to = ?next, "Verification state change");
        *state = next;
    }

    fn finish(
        citation: &Citation,
        state: &mut VerificationState,
        result: VerificationResult,
        lookup_invoked: bool,
    ) -> PolicyOutcome {
        Self::transition(citation, state, result.state());
        debug!(
            citation = %citation,
            method = %result.method,
            is_hallucinated = result.is_hallucinated,
            confidence = result.confidence,
            "Citation verified"
        );
        PolicyOutcome {
            result,
            lookup_invoked,
        }
    }
}
