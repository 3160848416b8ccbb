//! Case-summary generation.
//!
//! The verification policy asks a [`SummaryGenerator`] for several independent
//! summaries of one citation and measures how much they agree. Implementations:
//!
//! - [`OpenAiSummaryClient`]: OpenAI-compatible chat completions with retry and backoff.
//! - [`OfflineSummaryGenerator`]: fixed placeholder used when no API key is configured.

pub mod config;
pub mod error;
pub mod offline;
pub mod openai;
pub mod prompts;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


use async_trait::async_trait;

use crate::citation::Citation;

pub use config::SummaryConfig;
pub use error::{SummaryError, SummaryResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSummaryGenerator;
pub use offline::OfflineSummaryGenerator;
pub use openai::OpenAiSummaryClient;

#[async_trait]
/// Produces a prose summary of the case a citation refers to.
pub trait SummaryGenerator: Send + Sync {
    async fn generate(&self, citation: &Citation) -> SummaryResult<String>;

    /// Short name used in logs and readiness output.
    fn name(&self) -> &'static str;
}
