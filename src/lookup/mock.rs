use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::citation::Citation;

use super::CitationLookup;
use super::error::{LookupError, LookupResult};
use super::types::LookupOutcome;

/// In-memory lookup: every citation exists unless listed as missing or failing.
#[derive(Debug)]
pub struct MockCitationLookup {
    missing: RwLock<HashSet<String>>,
    failing: RwLock<HashSet<String>>,
    default_found: bool,
    calls: AtomicUsize,
}

impl Default for MockCitationLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCitationLookup {
    pub fn new() -> Self {
        Self {
            missing: RwLock::new(HashSet::new()),
            failing: RwLock::new(HashSet::new()),
            default_found: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Unlisted citations are reported as not found.
    pub fn nothing_found() -> Self {
        Self {
            default_found: false,
            ..Self::new()
        }
    }

    /// Reports `citation` as not found.
    pub fn with_missing(self, citation: &str) -> Self {
        self.missing.write().insert(citation.to_string());
        self
    }

    /// Fails every lookup of `citation`.
    pub fn with_failure(self, citation: &str) -> Self {
        self.failing.write().insert(citation.to_string());
        self
    }

    /// Number of lookups performed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CitationLookup for MockCitationLookup {
    async fn lookup(&self, citation: &Citation) -> LookupResult<LookupOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if citation.is_empty() {
            return Err(LookupError::EmptyCitation);
        }
        if self.failing.read().contains(citation.as_str()) {
            return Err(LookupError::Status {
                status: 503,
                body: "mock lookup failure".to_string(),
            });
        }
        if self.missing.read().contains(citation.as_str()) || !self.default_found {
            return Ok(LookupOutcome::not_found());
        }

        Ok(LookupOutcome::found(vec![serde_json::json!({
            "citation": citation.as_str(),
        })]))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
