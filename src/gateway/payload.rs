use serde::{Deserialize, Serialize};

use crate::citation::Citation;
use crate::constants::{DEFAULT_ITERATIONS, DEFAULT_SIMILARITY_THRESHOLD};
use crate::jobs::JobId;

fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

fn default_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

/// Body of `POST /api/analyze` and `POST /api/jobs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default = "default_iterations")]
    pub num_iterations: u32,
    #[serde(default = "default_threshold")]
    pub similarity_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub citations: Vec<Citation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobAccepted {
    pub job_id: JobId,
}
