//! Caching decorator for [`CitationLookup`].
//!
//! Only successful outcomes are cached; failures always go back to the service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::sync::Cache;
use tracing::debug;

use crate::citation::Citation;

use super::CitationLookup;
use super::error::LookupResult;
use super::types::LookupOutcome;

/// Bounded, TTL-expiring cache in front of another lookup.
pub struct CachedLookup {
    inner: Arc<dyn CitationLookup>,
    entries: Cache<Citation, LookupOutcome>,
}

impl CachedLookup {
    pub fn new(inner: Arc<dyn CitationLookup>, capacity: u64, ttl: Duration) -> Self {
        Self {
            inner,
            entries: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Returns the number of cached outcomes.
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CitationLookup for CachedLookup {
    async fn lookup(&self, citation: &Citation) -> LookupResult<LookupOutcome> {
        if let Some(outcome) = self.entries.get(citation) {
            debug!(citation = %citation, found = outcome.found, "Lookup cache hit");
            return Ok(outcome.from_cache());
        }

        let outcome = self.inner.lookup(citation).await?;
        self.entries.insert(citation.clone(), outcome.clone());
        Ok(outcome)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
