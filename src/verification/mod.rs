//! Per-citation verification policy.
//!
//! A citation is first checked against the authoritative lookup (if one is
//! configured). A definitive "not found" flags it as hallucinated with full
//! confidence. Otherwise several independent summaries are generated and their
//! average pairwise similarity is compared with the threshold: low agreement means
//! the generator is inventing details, which flags the citation. Every failure is
//! converted into a result, so one citation never aborts a batch.

pub mod policy;
pub mod types;


pub use policy::{PolicyOutcome, VerificationPolicy};
pub use types::{VerificationMethod, VerificationResult, VerificationState, confidence};
