use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::constants::STRAINER_STATUS_HEADER;
use crate::jobs::JobError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("upstream service failed: {0}")]
    UpstreamFailed(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<JobError> for GatewayError {
    fn from(e: JobError) -> Self {
        match e {
            JobError::InvalidInput(msg) => GatewayError::InvalidRequest(msg),
            JobError::InvalidParameters(msg) => GatewayError::InvalidParameters(msg),
            JobError::NotFound(id) => GatewayError::NotFound(format!("job {id}")),
            JobError::ExtractionFailure(msg) => GatewayError::ExtractionFailed(msg),
            JobError::CollaboratorFailure(msg) => GatewayError::UpstreamFailed(msg),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, strainer_status) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::InvalidParameters(_) => (StatusCode::BAD_REQUEST, "invalid_parameters"),
            GatewayError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            GatewayError::ExtractionFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "extraction_error")
            }
            GatewayError::UpstreamFailed(_) => (StatusCode::BAD_GATEWAY, "upstream_error"),
            GatewayError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            STRAINER_STATUS_HEADER,
            HeaderValue::from_static(strainer_status),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
