use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::citation::Citation;

use super::SummaryGenerator;
use super::error::{SummaryError, SummaryResult};

#[derive(Debug, Clone)]
enum Behavior {
    /// Same text on every call.
    Constant(String),
    /// Disjoint vocabulary on every call.
    Varying,
    /// Whitespace only.
    Blank,
}

/// Scriptable generator for policy and pipeline tests.
#[derive(Debug)]
pub struct MockSummaryGenerator {
    behavior: Behavior,
    failing: RwLock<HashSet<String>>,
    calls: AtomicUsize,
}

impl Default for MockSummaryGenerator {
    fn default() -> Self {
        Self::consistent()
    }
}

impl MockSummaryGenerator {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            failing: RwLock::new(HashSet::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Every summary of a citation is identical.
    pub fn consistent() -> Self {
        Self::with_behavior(Behavior::Constant(
            "The court held that the statute applied and affirmed the judgment below.".into(),
        ))
    }

    /// Every call returns `text`.
    pub fn constant(text: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Constant(text.into()))
    }

    /// Consecutive summaries share no words.
    pub fn varying() -> Self {
        Self::with_behavior(Behavior::Varying)
    }

    /// Every summary is blank.
    pub fn blank() -> Self {
        Self::with_behavior(Behavior::Blank)
    }

    /// Fails every request for `citation`.
    pub fn with_failure(self, citation: &str) -> Self {
        self.failing.write().insert(citation.to_string());
        self
    }

    /// Number of generate calls.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SummaryGenerator for MockSummaryGenerator {
    async fn generate(&self, citation: &Citation) -> SummaryResult<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing.read().contains(citation.as_str()) {
            return Err(SummaryError::Authentication {
                status: 401,
                message: "mock authentication failure".to_string(),
            });
        }

        Ok(match &self.behavior {
            Behavior::Constant(text) => text.clone(),
            Behavior::Varying => format!("draft{call} holding{call} facts{call}"),
            Behavior::Blank => "   ".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
