use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::citation::Citation;
use crate::verification::VerificationResult;

/// Opaque job identifier (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Running,
    Complete,
    Error,
}

impl JobStatus {
    /// `true` once the job will produce no more events.
    pub fn is_finished(&self) -> bool {
        !matches!(self, JobStatus::Running)
    }
}

/// Entry in a job's append-only event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JobEvent {
    /// About to check citation `current` (1-based) of `total`.
    Progress {
        current: usize,
        total: usize,
        message: String,
    },
    Started {
        total_citations: usize,
    },
    /// Result for the citation at `citation_index` (0-based, extraction order).
    Result {
        citation_index: usize,
        result: VerificationResult,
    },
    Complete {
        total_citations: usize,
        hallucinated_citations: usize,
    },
    Error {
        message: String,
    },
}

impl JobEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            JobEvent::Progress { .. } => "progress",
            JobEvent::Started { .. } => "started",
            JobEvent::Result { .. } => "result",
            JobEvent::Complete { .. } => "complete",
            JobEvent::Error { .. } => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    pub events: Vec<JobEvent>,
    pub created_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn new(id: JobId) -> Self {
        Self {
            id,
            status: JobStatus::Running,
            events: Vec::new(),
            created_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn snapshot(&self) -> JobSnapshot {
        JobSnapshot {
            job_id: self.id,
            status: self.status,
            events: self.events.clone(),
            completed: self.status.is_finished(),
            created_at: self.created_at,
        }
    }
}

/// Point-in-time copy of a job returned by polling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub job_id: JobId,
    pub status: JobStatus,
    pub events: Vec<JobEvent>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl JobSnapshot {
    pub fn last_event(&self) -> Option<&JobEvent> {
        self.events.last()
    }
}

/// A citation whose check recorded an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationError {
    pub citation: Citation,
    pub error: String,
}

/// Report of a synchronous analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub total_citations: usize,
    pub hallucinated_citations: usize,
    pub results: Vec<VerificationResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<CitationError>,
}

impl AnalysisReport {
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let hallucinated_citations = results.iter().filter(|r| r.is_hallucinated).count();
        let errors = results
            .iter()
            .filter_map(|r| {
                r.error.as_ref().map(|error| CitationError {
                    citation: r.citation.clone(),
                    error: error.clone(),
                })
            })
            .collect();

        Self {
            total_citations: results.len(),
            hallucinated_citations,
            results,
            errors,
        }
    }
}
