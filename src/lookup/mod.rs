//! Authoritative citation lookup.
//!
//! [`CitationLookup`] is the seam the verification policy consumes. The production
//! implementation is [`CourtListenerClient`], usually wrapped in [`CachedLookup`] so
//! repeated citations do not re-hit the rate-limited service.

pub mod cache;
pub mod config;
pub mod courtlistener;
pub mod error;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

use async_trait::async_trait;

use crate::citation::Citation;

pub use cache::CachedLookup;
pub use config::LookupConfig;
pub use courtlistener::CourtListenerClient;
pub use error::{LookupError, LookupResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockCitationLookup;
pub use types::LookupOutcome;

#[async_trait]
/// Answers whether a citation exists in an authoritative case-law database.
pub trait CitationLookup: Send + Sync {
    /// Looks up `citation`. An `Err` means the answer is unknown, not that the
    /// citation is missing.
    async fn lookup(&self, citation: &Citation) -> LookupResult<LookupOutcome>;

    /// Short name used in logs and readiness output.
    fn name(&self) -> &'static str;
}
