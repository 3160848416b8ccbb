use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::constants::LOW_CONFIDENCE_SIMILARITY;

use super::error::ScoringError;
use super::{jaccard, tfidf};

/// Similarity algorithm selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimilarityStrategy {
    /// TF-IDF cosine with Jaccard fallback.
    #[default]
    Tfidf,
    /// Word-set Jaccard only.
    Jaccard,
}

impl SimilarityStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityStrategy::Tfidf => "tfidf",
            SimilarityStrategy::Jaccard => "jaccard",
        }
    }
}

impl fmt::Display for SimilarityStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimilarityStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tfidf" | "tf-idf" => Ok(Self::Tfidf),
            "jaccard" | "simple" => Ok(Self::Jaccard),
            _ => Err(format!("Unknown similarity strategy: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer {
    strategy: SimilarityStrategy,
}

impl SimilarityScorer {
    pub fn new(strategy: SimilarityStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> SimilarityStrategy {
        self.strategy
    }

    /// Similarity of two passages in `[0, 1]`.
    ///
    /// Both inputs are trimmed first; blank input is rejected and identical input scores
    /// `1.0` without running either algorithm.
    pub fn similarity(&self, a: &str, b: &str) -> Result<f64, ScoringError> {
        let a = a.trim();
        let b = b.trim();

        if a.is_empty() || b.is_empty() {
            return Err(ScoringError::InvalidInput {
                reason: "texts cannot be empty after trimming".to_string(),
            });
        }
        if a == b {
            return Ok(1.0);
        }

        match self.strategy {
            SimilarityStrategy::Tfidf => match tfidf::cosine_similarity(a, b) {
                Ok(score) => Ok(score),
                Err(e) => {
                    debug!(error = %e, "TF-IDF unavailable for input, using Jaccard");
                    Ok(Self::fallback(a, b))
                }
            },
            SimilarityStrategy::Jaccard => Ok(Self::fallback(a, b)),
        }
    }

    fn fallback(a: &str, b: &str) -> f64 {
        let score = jaccard::similarity(a, b);
        if score.is_finite() {
            score
        } else {
            warn!("Jaccard similarity was not finite, using low-confidence default");
            LOW_CONFIDENCE_SIMILARITY
        }
    }

    /// Mean of all pairwise similarities; `1.0` for fewer than two summaries.
    pub fn average_similarity(&self, summaries: &[String]) -> Result<f64, ScoringError> {
        if summaries.len() < 2 {
            return Ok(1.0);
        }

        let mut total = 0.0;
        let mut pairs = 0usize;
        for (i, a) in summaries.iter().enumerate() {
            for b in &summaries[i + 1..] {
                total += self.similarity(a, b)?;
                pairs += 1;
            }
        }

        let average = total / pairs as f64;
        debug!(
            summaries = summaries.len(),
            pairs,
            average,
            strategy = %self.strategy,
            "Computed average similarity"
        );
        Ok(average)
    }
}
