use std::sync::Arc;

use tracing::{info, warn};

use crate::citation::CitationExtractor;
use crate::config::{Config, ConfigError};
use crate::document::{PlainTextExtractor, TextExtractor};
use crate::jobs::JobOrchestrator;
use crate::lookup::{CachedLookup, CitationLookup, CourtListenerClient};
use crate::scoring::SimilarityScorer;
use crate::summary::{OfflineSummaryGenerator, OpenAiSummaryClient, SummaryGenerator};
use crate::verification::VerificationPolicy;

#[derive(Clone, Debug)]
pub struct AppState {
    pub orchestrator: JobOrchestrator,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(orchestrator: JobOrchestrator, max_upload_bytes: usize) -> Self {
        Self {
            orchestrator,
            max_upload_bytes,
        }
    }

    /// Builds the orchestrator and its collaborators from `config`.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let orchestrator = JobOrchestrator::in_memory(
            CitationExtractor::new(config.extraction_strategy),
            Arc::new(PlainTextExtractor::new()) as Arc<dyn TextExtractor>,
            VerificationPolicy::new(
                build_lookup(config)?,
                build_generator(config)?,
                SimilarityScorer::new(config.similarity_strategy),
            ),
            config.jobs.clone(),
        );
        Ok(Self::new(orchestrator, config.max_upload_bytes))
    }
}

fn build_lookup(config: &Config) -> Result<Option<Arc<dyn CitationLookup>>, ConfigError> {
    if config.mock_provider || !config.lookup.enabled {
        info!("Authoritative lookup disabled");
        return Ok(None);
    }

    let client: Arc<dyn CitationLookup> = Arc::new(CourtListenerClient::new(&config.lookup)?);
    if !config.lookup.caching_enabled() {
        return Ok(Some(client));
    }
    Ok(Some(Arc::new(CachedLookup::new(
        client,
        config.lookup.cache_capacity,
        config.lookup.cache_ttl,
    ))))
}

fn build_generator(config: &Config) -> Result<Arc<dyn SummaryGenerator>, ConfigError> {
    if config.mock_provider {
        info!("Mock provider enabled, using offline summaries");
        return Ok(Arc::new(OfflineSummaryGenerator::new()));
    }
    if !config.summary.has_api_key() {
        warn!("No LLM API key configured, using offline summaries");
        return Ok(Arc::new(OfflineSummaryGenerator::new()));
    }
    Ok(Arc::new(OpenAiSummaryClient::new(config.summary.clone())?))
}
