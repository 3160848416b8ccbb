use async_trait::async_trait;

use crate::citation::Citation;

use super::SummaryGenerator;
use super::error::SummaryResult;

/// Generator used when no LLM is configured. Every call returns the same placeholder,
/// so repeated summaries of one citation are always identical.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSummaryGenerator;

impl OfflineSummaryGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn placeholder(citation: &Citation) -> String {
        format!("Summary of {citation} would be generated by an LLM in a real implementation.")
    }
}

#[async_trait]
impl SummaryGenerator for OfflineSummaryGenerator {
    async fn generate(&self, citation: &Citation) -> SummaryResult<String> {
        Ok(Self::placeholder(citation))
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}
