//! Cross-cutting, shared constants.
//!
//! Parameter ranges are enforced at submission time by the job orchestrator and the
//! HTTP gateway; everything downstream assumes they already hold.

use std::ops::RangeInclusive;

/// Default number of independent summaries requested per citation.
pub const DEFAULT_ITERATIONS: u32 = 3;
/// Accepted `num_iterations` range.
pub const ITERATIONS_RANGE: RangeInclusive<u32> = 1..=10;

/// Default similarity threshold below which a citation is flagged.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;
/// Accepted `similarity_threshold` range.
pub const THRESHOLD_RANGE: RangeInclusive<f64> = 0.1..=1.0;

/// Similarity reported when a strategy fails unexpectedly.
pub const LOW_CONFIDENCE_SIMILARITY: f64 = 0.1;

/// Lower bound for the confidence denominator.
pub const CONFIDENCE_EPSILON: f64 = 1e-6;

/// Characters of the document used as a synthetic citation when extraction finds nothing.
pub const SYNTHETIC_CITATION_PREVIEW_CHARS: usize = 100;

/// Seconds a finished job stays pollable before eviction.
pub const DEFAULT_JOB_TTL_SECS: u64 = 300;
/// Delay between citations when the authoritative lookup was called.
pub const DEFAULT_PACING_DELAY_MS: u64 = 500;

/// Maximum accepted upload size (bytes).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Response header carrying a short machine-readable outcome.
pub const STRAINER_STATUS_HEADER: &str = "x-strainer-status";
/// Header value for healthy/ready components.
pub const STRAINER_STATUS_READY: &str = "ready";

/// Returns `true` if `iterations` is in [`ITERATIONS_RANGE`].
pub fn iterations_in_range(iterations: u32) -> bool {
    ITERATIONS_RANGE.contains(&iterations)
}

/// Returns `true` if `threshold` is finite and in [`THRESHOLD_RANGE`].
pub fn threshold_in_range(threshold: f64) -> bool {
    threshold.is_finite() && THRESHOLD_RANGE.contains(&threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_bounds() {
        assert!(!iterations_in_range(0));
        assert!(iterations_in_range(1));
        assert!(iterations_in_range(10));
        assert!(!iterations_in_range(11));
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(threshold_in_range(0.1));
        assert!(threshold_in_range(1.0));
        assert!(!threshold_in_range(0.09));
        assert!(!threshold_in_range(1.5));
        assert!(!threshold_in_range(f64::NAN));
    }
}
