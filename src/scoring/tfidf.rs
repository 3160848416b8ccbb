//! Two-document TF-IDF cosine similarity.
//!
//! Terms are lowercased runs of two or more word characters. Weights are raw term
//! counts times the smoothed inverse document frequency `ln((1 + n) / (1 + df)) + 1`
//! with `n = 2`, and each document vector is L2-normalized before the dot product.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::error::ScoringError;

static TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid term pattern"));

const DOCUMENTS: f64 = 2.0;

fn terms(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TERM.find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn smooth_idf(document_frequency: f64) -> f64 {
    ((1.0 + DOCUMENTS) / (1.0 + document_frequency)).ln() + 1.0
}

/// Cosine similarity of the TF-IDF vectors of `a` and `b`, clamped to `[0, 1]`.
///
/// Returns [`ScoringError::EmptyVocabulary`] if neither text has a single term.
pub fn cosine_similarity(a: &str, b: &str) -> Result<f64, ScoringError> {
    // term -> (count in a, count in b)
    let mut counts: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for term in terms(a) {
        counts.entry(term).or_default().0 += 1.0;
    }
    for term in terms(b) {
        counts.entry(term).or_default().1 += 1.0;
    }

    if counts.is_empty() {
        return Err(ScoringError::EmptyVocabulary);
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for (tf_a, tf_b) in counts.values() {
        let df = f64::from(u8::from(*tf_a > 0.0) + u8::from(*tf_b > 0.0));
        let idf = smooth_idf(df);
        let (wa, wb) = (tf_a * idf, tf_b * idf);
        dot += wa * wb;
        norm_a += wa * wa;
        norm_b += wb * wb;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    Ok(similarity.clamp(0.0, 1.0))
}
