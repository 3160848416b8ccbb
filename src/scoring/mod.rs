//! Bounded similarity between generated summaries.
//!
//! [`SimilarityScorer`] compares two passages and returns a score in `[0, 1]`:
//!
//! - [`SimilarityStrategy::Tfidf`] vectorizes both texts with smoothed TF-IDF weights and
//!   takes the cosine of the L2-normalized vectors. When the shared vocabulary is empty it
//!   falls back to Jaccard.
//! - [`SimilarityStrategy::Jaccard`] compares lowercased, punctuation-stripped word sets.
//!
//! Identical (trimmed) inputs always score `1.0`. [`SimilarityScorer::average_similarity`]
//! is the mean over all pairs and is what the verification policy thresholds on.

pub mod error;
pub mod jaccard;
pub mod scorer;
pub mod tfidf;

#[cfg(test)]
mod tests;

pub use error::ScoringError;
pub use scorer::{SimilarityScorer, SimilarityStrategy};
