//! Strainer library crate (used by the server binary and integration tests).
//!
//! Strainer finds case-law citations in legal-brief text and estimates, for each one,
//! whether it was fabricated. A citation is first looked up in an authoritative case
//! database; if that is inconclusive, several independent summaries of the case are
//! generated and compared, and a citation whose summaries disagree is flagged.
//!
//! ## Modules
//! - [`citation`] - citation extraction (structured tokenizer, regex fallback)
//! - [`scoring`] - passage similarity (TF-IDF cosine, Jaccard fallback)
//! - [`lookup`] - authoritative lookup (CourtListener client, cache)
//! - [`summary`] - summary generation (OpenAI-compatible client, offline generator)
//! - [`document`] - text extraction from uploads
//! - [`verification`] - the per-citation verification policy
//! - [`jobs`] - asynchronous jobs, event logs and eviction
//! - [`gateway`] - HTTP transport
//!
//! ## Test/Mock Support
//! Mock collaborators are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod citation;
pub mod config;
pub mod constants;
pub mod document;
pub mod gateway;
pub mod jobs;
pub mod lookup;
pub mod scoring;
pub mod summary;
pub mod verification;

pub use citation::{Citation, CitationExtractor, ExtractionError, ExtractionStrategy};
pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_ITERATIONS, DEFAULT_SIMILARITY_THRESHOLD, STRAINER_STATUS_HEADER,
    STRAINER_STATUS_READY,
};
pub use document::{DocumentError, DocumentRef, PlainTextExtractor, TextExtractor};
pub use gateway::{AppState, GatewayError, create_router};
pub use jobs::{
    AnalysisReport, JobConfig, JobError, JobEvent, JobId, JobOrchestrator, JobSnapshot,
    JobStatus, SubmitRequest,
};
#[cfg(any(test, feature = "mock"))]
pub use lookup::MockCitationLookup;
pub use lookup::{CachedLookup, CitationLookup, CourtListenerClient, LookupConfig, LookupError};
pub use scoring::{ScoringError, SimilarityScorer, SimilarityStrategy};
#[cfg(any(test, feature = "mock"))]
pub use summary::MockSummaryGenerator;
pub use summary::{
    OfflineSummaryGenerator, OpenAiSummaryClient, SummaryConfig, SummaryError, SummaryGenerator,
};
pub use verification::{VerificationMethod, VerificationPolicy, VerificationResult};
