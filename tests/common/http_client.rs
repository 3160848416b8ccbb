//! HTTP client helpers for tests.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strainer::jobs::{AnalysisReport, JobSnapshot};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const POLL_INTERVAL: Duration = Duration::from_millis(10);
const MAX_POLLS: usize = 500;

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    async fn expect_json<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, TestClientError> {
        match resp.status().as_u16() {
            200 | 202 => Ok(resp.json().await?),
            404 => Err(TestClientError::NotFound(resp.text().await?)),
            400 | 422 => Err(TestClientError::BadRequest(resp.text().await?)),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/healthz")).send().await?;
        Self::expect_json(resp).await
    }

    pub async fn ready(&self) -> Result<ReadyResponse, TestClientError> {
        let resp = self.client.get(self.url("/ready")).send().await?;
        Self::expect_json(resp).await
    }

    pub async fn analyze(
        &self,
        text: &str,
        num_iterations: u32,
        similarity_threshold: f64,
    ) -> Result<AnalysisReport, TestClientError> {
        let body = json!({
            "text": text,
            "num_iterations": num_iterations,
            "similarity_threshold": similarity_threshold,
        });
        let resp = self
            .client
            .post(self.url("/api/analyze"))
            .json(&body)
            .send()
            .await?;
        Self::expect_json(resp).await
    }

    pub async fn submit_text(
        &self,
        text: &str,
        num_iterations: u32,
        similarity_threshold: f64,
    ) -> Result<String, TestClientError> {
        let body = json!({
            "text": text,
            "num_iterations": num_iterations,
            "similarity_threshold": similarity_threshold,
        });
        let resp = self
            .client
            .post(self.url("/api/jobs"))
            .json(&body)
            .send()
            .await?;
        let accepted: Value = Self::expect_json(resp).await?;
        Ok(accepted["job_id"].as_str().unwrap_or_default().to_string())
    }

    pub async fn upload(
        &self,
        file_name: &str,
        contents: Vec<u8>,
        num_iterations: u32,
    ) -> Result<String, TestClientError> {
        let form = reqwest::multipart::Form::new()
            .text("num_iterations", num_iterations.to_string())
            .part(
                "file",
                reqwest::multipart::Part::bytes(contents).file_name(file_name.to_string()),
            );
        let resp = self
            .client
            .post(self.url("/api/jobs/upload"))
            .multipart(form)
            .send()
            .await?;
        let accepted: Value = Self::expect_json(resp).await?;
        Ok(accepted["job_id"].as_str().unwrap_or_default().to_string())
    }

    pub async fn poll(&self, job_id: &str) -> Result<JobSnapshot, TestClientError> {
        let resp = self
            .client
            .get(self.url(&format!("/api/jobs/{job_id}")))
            .send()
            .await?;
        Self::expect_json(resp).await
    }

    pub async fn wait_for_job(&self, job_id: &str) -> Result<JobSnapshot, TestClientError> {
        for _ in 0..MAX_POLLS {
            let snapshot = self.poll(job_id).await?;
            if snapshot.completed {
                return Ok(snapshot);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
        Err(TestClientError::Timeout(job_id.to_string()))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ComponentStatus {
    pub http: String,
    pub lookup: String,
    pub summary: String,
    pub extraction: String,
    pub similarity: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub components: ComponentStatus,
}

impl ReadyResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unexpected HTTP status: {0} - Body: {1}")]
    UnexpectedStatus(u16, String),

    #[error("Job {0} did not complete")]
    Timeout(String),
}
