//! Runs the verification pipeline over whole documents.
//!
//! Each submission creates a job and spawns one task that owns it until it finishes.
//! The task resolves the document text, extracts citations and verifies them one at a
//! time, appending events to the job's log as it goes. A watcher awaits the task and
//! fails the job if the task panics, so every job ends `complete` or `error`. Finished
//! jobs are handed to the [`EvictionScheduler`].

use std::sync::Arc;

use tokio::task::JoinError;
use tracing::{debug, error, info, instrument, warn};

use crate::citation::{Citation, CitationExtractor};
use crate::constants::{iterations_in_range, threshold_in_range};
use crate::document::{DocumentRef, TextExtractor};
use crate::verification::{VerificationPolicy, VerificationResult};

use super::config::JobConfig;
use super::error::{JobError, JobResult};
use super::scheduler::EvictionScheduler;
use super::store::{InMemoryJobStore, JobStore};
use super::types::{AnalysisReport, Job, JobEvent, JobId, JobSnapshot, JobStatus};

/// A document submission. When both are given the file wins.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub text: Option<String>,
    pub document: Option<DocumentRef>,
    pub iterations: u32,
    pub threshold: f64,
}

impl SubmitRequest {
    pub fn text(text: impl Into<String>, iterations: u32, threshold: f64) -> Self {
        Self {
            text: Some(text.into()),
            document: None,
            iterations,
            threshold,
        }
    }

    pub fn document(document: DocumentRef, iterations: u32, threshold: f64) -> Self {
        Self {
            text: None,
            document: Some(document),
            iterations,
            threshold,
        }
    }
}

#[derive(Debug)]
enum JobInput {
    Text(String),
    Document(DocumentRef),
}

#[derive(Clone)]
pub struct JobOrchestrator {
    store: Arc<dyn JobStore>,
    scheduler: Arc<EvictionScheduler>,
    extractor: Arc<CitationExtractor>,
    documents: Arc<dyn TextExtractor>,
    policy: Arc<VerificationPolicy>,
    config: JobConfig,
}

impl std::fmt::Debug for JobOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobOrchestrator")
            .field("extraction", &self.extractor.strategy())
            .field("policy", &self.policy)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl JobOrchestrator {
    pub fn new(
        store: Arc<dyn JobStore>,
        extractor: CitationExtractor,
        documents: Arc<dyn TextExtractor>,
        policy: VerificationPolicy,
        config: JobConfig,
    ) -> Self {
        let scheduler = Arc::new(EvictionScheduler::new(Arc::clone(&store)));
        Self {
            store,
            scheduler,
            extractor: Arc::new(extractor),
            documents,
            policy: Arc::new(policy),
            config,
        }
    }

    /// Creates an orchestrator backed by an [`InMemoryJobStore`].
    pub fn in_memory(
        extractor: CitationExtractor,
        documents: Arc<dyn TextExtractor>,
        policy: VerificationPolicy,
        config: JobConfig,
    ) -> Self {
        Self::new(
            Arc::new(InMemoryJobStore::new()),
            extractor,
            documents,
            policy,
            config,
        )
    }

    pub fn policy(&self) -> &VerificationPolicy {
        &self.policy
    }

    pub fn extractor(&self) -> &CitationExtractor {
        &self.extractor
    }

    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &EvictionScheduler {
        &self.scheduler
    }

    /// Validates `request`, creates a job and starts it in the background.
    ///
    /// Bad parameters, missing input, blank text and unsupported file types are
    /// rejected here; nothing is spawned for them.
    #[instrument(skip(self, request), fields(iterations = request.iterations, threshold = request.threshold))]
    pub async fn submit(&self, request: SubmitRequest) -> JobResult<JobId> {
        validate_parameters(request.iterations, request.threshold)?;

        let input = match (request.document, request.text) {
            (Some(document), _) => {
                document.format()?;
                JobInput::Document(document)
            }
            (None, Some(text)) => {
                if text.trim().is_empty() {
                    return Err(JobError::InvalidInput("text cannot be empty".to_string()));
                }
                JobInput::Text(text)
            }
            (None, None) => {
                return Err(JobError::InvalidParameters(
                    "either text or a file is required".to_string(),
                ));
            }
        };

        let id = JobId::new();
        self.store.create(Job::new(id)).await?;
        info!(job_id = %id, "Job submitted");

        let orchestrator = self.clone();
        let task = tokio::spawn(async move {
            orchestrator
                .run_job(id, input, request.iterations, request.threshold)
                .await;
        });
        let watcher = self.clone();
        tokio::spawn(async move {
            if let Err(e) = task.await {
                watcher.fail_aborted_job(id, e).await;
            }
        });

        Ok(id)
    }

    /// Returns a snapshot of the job.
    pub async fn poll(&self, id: &JobId) -> JobResult<JobSnapshot> {
        self.store.read(id).await
    }

    /// Verifies every citation in `text` and returns the full report.
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn analyze(
        &self,
        text: &str,
        iterations: u32,
        threshold: f64,
    ) -> JobResult<AnalysisReport> {
        validate_parameters(iterations, threshold)?;
        let citations = self.citations_for(text)?;

        let mut results = Vec::with_capacity(citations.len());
        for (index, citation) in citations.iter().enumerate() {
            let outcome = self.policy.verify(citation, iterations, threshold).await;
            results.push(outcome.result);
            if outcome.lookup_invoked && index + 1 < citations.len() {
                self.pace().await;
            }
        }

        let report = AnalysisReport::from_results(results);
        info!(
            total = report.total_citations,
            hallucinated = report.hallucinated_citations,
            "Analysis finished"
        );
        Ok(report)
    }

    /// Extracts citations from `text` without verifying them.
    pub fn extract(&self, text: &str) -> JobResult<Vec<Citation>> {
        Ok(self.extractor.extract(text)?)
    }

    /// Stops scheduling evictions and aborts pending ones.
    pub fn shutdown(&self) {
        self.scheduler.shutdown();
    }

    /// Extracted citations, or the synthetic preview citation if there are none.
    fn citations_for(&self, text: &str) -> JobResult<Vec<Citation>> {
        let citations = self.extractor.extract(text)?;
        if !citations.is_empty() {
            return Ok(citations);
        }
        debug!("No citations found, checking the document preview instead");
        Ok(Citation::synthetic(text).into_iter().collect())
    }

    async fn pace(&self) {
        if !self.config.pacing_delay.is_zero() {
            tokio::time::sleep(self.config.pacing_delay).await;
        }
    }

    async fn resolve_text(&self, input: JobInput) -> JobResult<String> {
        match input {
            JobInput::Text(text) => Ok(text),
            JobInput::Document(document) => Ok(self.documents.extract_text(&document).await?),
        }
    }

    async fn run_job(&self, id: JobId, input: JobInput, iterations: u32, threshold: f64) {
        let writer = JobWriter {
            store: Arc::clone(&self.store),
            id,
        };

        let citations = match self.resolve_text(input).await {
            Ok(text) => self.citations_for(&text),
            Err(e) => Err(e),
        };
        let citations = match citations {
            Ok(citations) => citations,
            Err(e) => {
                error!(job_id = %id, error = %e, "Job failed before checking citations");
                writer
                    .emit(JobEvent::Error {
                        message: e.to_string(),
                    })
                    .await;
                writer.finish(JobStatus::Error).await;
                self.scheduler.schedule(id, self.config.ttl);
                return;
            }
        };

        let total = citations.len();
        info!(job_id = %id, total, "Job started");
        writer
            .emit(JobEvent::Started {
                total_citations: total,
            })
            .await;

        let mut hallucinated = 0;
        for (index, citation) in citations.iter().enumerate() {
            writer
                .emit(JobEvent::Progress {
                    current: index + 1,
                    total,
                    message: format!("Checking citation {} of {}: {}", index + 1, total, citation),
                })
                .await;

            let outcome = self.policy.verify(citation, iterations, threshold).await;
            if outcome.result.is_hallucinated {
                hallucinated += 1;
            }
            writer
                .emit(JobEvent::Result {
                    citation_index: index,
                    result: outcome.result,
                })
                .await;

            if outcome.lookup_invoked && index + 1 < total {
                self.pace().await;
            }
        }

        writer
            .emit(JobEvent::Complete {
                total_citations: total,
                hallucinated_citations: hallucinated,
            })
            .await;
        writer.finish(JobStatus::Complete).await;
        info!(job_id = %id, total, hallucinated, "Job complete");

        self.scheduler.schedule(id, self.config.ttl);
    }

    async fn fail_aborted_job(&self, id: JobId, cause: JoinError) {
        error!(job_id = %id, error = %cause, "Job task ended abnormally");
        let writer = JobWriter {
            store: Arc::clone(&self.store),
            id,
        };
        writer
            .emit(JobEvent::Error {
                message: "internal error while checking citations".to_string(),
            })
            .await;
        writer.finish(JobStatus::Error).await;
        self.scheduler.schedule(id, self.config.ttl);
    }
}

/// Writes a job's events and final status; owned by the job task.
struct JobWriter {
    store: Arc<dyn JobStore>,
    id: JobId,
}

impl JobWriter {
    async fn emit(&self, event: JobEvent) {
        let kind = event.kind();
        if let Err(e) = self.store.append(&self.id, event).await {
            warn!(job_id = %self.id, kind, error = %e, "Dropping job event");
        }
    }

    async fn finish(&self, status: JobStatus) {
        if let Err(e) = self.store.set_status(&self.id, status).await {
            warn!(job_id = %self.id, error = %e, "Failed to record job status");
        }
    }
}

/// Checks the iteration count and similarity threshold ranges.
pub fn validate_parameters(iterations: u32, threshold: f64) -> JobResult<()> {
    if !iterations_in_range(iterations) {
        return Err(JobError::InvalidParameters(format!(
            "num_iterations must be between 1 and 10, got {iterations}"
        )));
    }
    if !threshold_in_range(threshold) {
        return Err(JobError::InvalidParameters(format!(
            "similarity_threshold must be between 0.1 and 1.0, got {threshold}"
        )));
    }
    Ok(())
}

/// Results of a finished job in citation order.
pub fn results_of(snapshot: &JobSnapshot) -> Vec<&VerificationResult> {
    snapshot
        .events
        .iter()
        .filter_map(|event| match event {
            JobEvent::Result { result, .. } => Some(result),
            _ => None,
        })
        .collect()
}
