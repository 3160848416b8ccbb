use std::str::FromStr;

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::constants::{DEFAULT_ITERATIONS, DEFAULT_SIMILARITY_THRESHOLD};
use crate::document::DocumentRef;
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{AnalyzeRequest, ExtractRequest, ExtractResponse, JobAccepted};
use crate::gateway::state::AppState;
use crate::jobs::{JobId, SubmitRequest};

fn parse_body<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, GatewayError> {
    serde_json::from_value(body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))
}

fn require_text(text: Option<String>) -> Result<String, GatewayError> {
    text.ok_or_else(|| GatewayError::InvalidRequest("No text provided".to_string()))
}

#[instrument(skip(state, body))]
pub async fn analyze_handler(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let request: AnalyzeRequest = parse_body(body)?;
    let text = require_text(request.text)?;

    let report = state
        .orchestrator
        .analyze(&text, request.num_iterations, request.similarity_threshold)
        .await?;

    Ok(Json(report).into_response())
}

#[instrument(skip(state, body))]
pub async fn extract_handler(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let request: ExtractRequest = parse_body(body)?;
    let text = require_text(request.text)?;

    let citations = state.orchestrator.extract(&text)?;
    Ok(Json(ExtractResponse { citations }).into_response())
}

#[instrument(skip(state, body))]
pub async fn submit_job_handler(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let request: AnalyzeRequest = parse_body(body)?;

    let job_id = state
        .orchestrator
        .submit(SubmitRequest {
            text: request.text,
            document: None,
            iterations: request.num_iterations,
            threshold: request.similarity_threshold,
        })
        .await?;

    Ok((StatusCode::ACCEPTED, Json(JobAccepted { job_id })).into_response())
}

/// Multipart upload: a `file` part plus optional `text`, `num_iterations` and
/// `similarity_threshold` fields.
#[instrument(skip(state, multipart))]
pub async fn upload_job_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, GatewayError> {
    let mut document = None;
    let mut text = None;
    let mut iterations = DEFAULT_ITERATIONS;
    let mut threshold = DEFAULT_SIMILARITY_THRESHOLD;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;
                debug!(file_name = %file_name, bytes = bytes.len(), "Received upload");
                document = Some(DocumentRef::new(file_name, bytes.to_vec()));
            }
            "text" => text = Some(field_text(field).await?),
            "num_iterations" => iterations = parse_field(&name, &field_text(field).await?)?,
            "similarity_threshold" => threshold = parse_field(&name, &field_text(field).await?)?,
            _ => debug!(field = %name, "Ignoring unknown multipart field"),
        }
    }

    let job_id = state
        .orchestrator
        .submit(SubmitRequest {
            text,
            document,
            iterations,
            threshold,
        })
        .await?;

    Ok((StatusCode::ACCEPTED, Json(JobAccepted { job_id })).into_response())
}

#[instrument(skip(state))]
pub async fn poll_job_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, GatewayError> {
    let job_id = JobId::from_str(&id).map_err(|_| GatewayError::NotFound(format!("job {id}")))?;
    let snapshot = state.orchestrator.poll(&job_id).await?;
    Ok(Json(snapshot).into_response())
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> Result<String, GatewayError> {
    field
        .text()
        .await
        .map_err(|e| GatewayError::InvalidRequest(e.to_string()))
}

fn parse_field<T: FromStr>(name: &str, value: &str) -> Result<T, GatewayError> {
    value
        .trim()
        .parse()
        .map_err(|_| GatewayError::InvalidParameters(format!("{name} is not a number: '{value}'")))
}
