//! Asynchronous verification jobs.
//!
//! A job is an append-only event log plus a status, created by
//! [`JobOrchestrator::submit`] and read back with [`JobOrchestrator::poll`]. Jobs live
//! in a [`JobStore`] and are evicted by the [`EvictionScheduler`] once they have been
//! finished for [`JobConfig::ttl`].

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod scheduler;
pub mod store;
pub mod types;


pub use config::JobConfig;
pub use error::{JobError, JobResult};
pub use orchestrator::{JobOrchestrator, SubmitRequest, results_of, validate_parameters};
pub use scheduler::EvictionScheduler;
pub use store::{InMemoryJobStore, JobStore};
pub use types::{AnalysisReport, CitationError, Job, JobEvent, JobId, JobSnapshot, JobStatus};
