//! HTTP gateway (Axum) for citation analysis and verification jobs.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{
    analyze_handler, extract_handler, poll_job_handler, submit_job_handler, upload_job_handler,
};
pub use state::AppState;

use crate::constants::{STRAINER_STATUS_HEADER, STRAINER_STATUS_READY};

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/extract", post(extract_handler))
        .route("/api/jobs", post(submit_job_handler))
        .route("/api/jobs/upload", post(upload_job_handler))
        .route("/api/jobs/{id}", get(poll_job_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

/// Which implementation backs each collaborator.
#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub lookup: &'static str,
    pub summary: &'static str,
    pub extraction: &'static str,
    pub similarity: &'static str,
}

fn status_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        STRAINER_STATUS_HEADER,
        HeaderValue::from_static(STRAINER_STATUS_READY),
    );
    headers
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (
        StatusCode::OK,
        status_headers(),
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let orchestrator = &state.orchestrator;
    let policy = orchestrator.policy();

    let components = ComponentStatus {
        http: STRAINER_STATUS_READY,
        lookup: policy.lookup_name().unwrap_or("disabled"),
        summary: policy.generator_name(),
        extraction: orchestrator.extractor().strategy().as_str(),
        similarity: policy.scorer().strategy().as_str(),
    };

    (
        StatusCode::OK,
        status_headers(),
        Json(ReadyResponse {
            status: "ok",
            components,
        }),
    )
        .into_response()
}
