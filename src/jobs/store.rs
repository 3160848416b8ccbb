//! Job storage.
//!
//! [`JobStore`] is the seam between the orchestrator and wherever jobs live.
//! [`InMemoryJobStore`] keeps them in a `HashMap` behind a `parking_lot` lock; reads
//! return snapshot copies so pollers never observe a half-written event.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

use super::error::{JobError, JobResult};
use super::types::{Job, JobEvent, JobId, JobSnapshot, JobStatus};

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Adds a new job. Fails if the id is taken.
    async fn create(&self, job: Job) -> JobResult<()>;

    /// Appends `event` to the job's log.
    async fn append(&self, id: &JobId, event: JobEvent) -> JobResult<()>;

    /// Updates the job status; finished statuses record the finish time.
    async fn set_status(&self, id: &JobId, status: JobStatus) -> JobResult<()>;

    /// Returns a copy of the job.
    async fn read(&self, id: &JobId) -> JobResult<JobSnapshot>;

    /// Removes the job. Returns `true` if it existed.
    async fn evict(&self, id: &JobId) -> bool;

    /// Number of stored jobs.
    async fn len(&self) -> usize;
}

#[derive(Debug, Default)]
pub struct InMemoryJobStore {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_job<T>(&self, id: &JobId, f: impl FnOnce(&mut Job) -> T) -> JobResult<T> {
        let mut jobs = self.jobs.write();
        let job = jobs
            .get_mut(id)
            .ok_or_else(|| JobError::NotFound(id.to_string()))?;
        Ok(f(job))
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn create(&self, job: Job) -> JobResult<()> {
        let mut jobs = self.jobs.write();
        if jobs.contains_key(&job.id) {
            return Err(JobError::CollaboratorFailure(format!(
                "job {} already exists",
                job.id
            )));
        }
        jobs.insert(job.id, job);
        Ok(())
    }

    async fn append(&self, id: &JobId, event: JobEvent) -> JobResult<()> {
        self.with_job(id, |job| job.events.push(event))
    }

    async fn set_status(&self, id: &JobId, status: JobStatus) -> JobResult<()> {
        self.with_job(id, |job| {
            job.status = status;
            if status.is_finished() {
                job.finished_at = Some(Utc::now());
            }
        })
    }

    async fn read(&self, id: &JobId) -> JobResult<JobSnapshot> {
        self.jobs
            .read()
            .get(id)
            .map(Job::snapshot)
            .ok_or_else(|| JobError::NotFound(id.to_string()))
    }

    async fn evict(&self, id: &JobId) -> bool {
        let removed = self.jobs.write().remove(id).is_some();
        if removed {
            debug!(job_id = %id, "Job evicted");
        }
        removed
    }

    async fn len(&self) -> usize {
        self.jobs.read().len()
    }
}
