//! Extraction endpoints.

use std::time::Instant;

use axum::extract::{Path, Request, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use formscan_core::{Extraction, ScanError};
use logging::{ScanEvent, ScanEventLogger, ScanMode};
use uuid::Uuid;

use crate::error::ApiError;
use crate::server::ApiState;
use crate::types::HealthResponse;
use crate::upload::read_upload;

/// A full mapping is JSON; a single field value is sent as plain text.
pub struct ExtractionResponse(pub Extraction);

impl IntoResponse for ExtractionResponse {
    fn into_response(self) -> Response {
        match self.0 {
            Extraction::Fields(fields) => Json(fields).into_response(),
            Extraction::Field(value) => value.into_response(),
        }
    }
}

fn item_count(extraction: &Extraction) -> usize {
    match extraction {
        Extraction::Fields(fields) => fields.len(),
        Extraction::Field(_) => 1,
    }
}

fn record<T>(
    request_id: Uuid,
    mode: ScanMode,
    document_bytes: usize,
    start: Instant,
    outcome: &Result<T, ScanError>,
    items: impl FnOnce(&T) -> usize,
) {
    let event = match outcome {
        Ok(value) => ScanEvent::Completed {
            mode,
            document_bytes,
            items: items(value),
            latency_ms: start.elapsed().as_millis() as u64,
        },
        Err(err) => ScanEvent::Failed {
            mode,
            error_type: err.kind().to_string(),
            error_msg: err.to_string(),
        },
    };
    ScanEventLogger::log_event(request_id, event);
}

/// `GET /` analyses the configured sample document.
pub async fn analyze_sample(State(state): State<ApiState>) -> Result<ExtractionResponse, ApiError> {
    let request_id = Uuid::new_v4();
    let start = Instant::now();

    let outcome = state.service.extract(None, None).await;
    record(request_id, ScanMode::Sample, 0, start, &outcome, item_count);
    Ok(ExtractionResponse(outcome?))
}

/// `POST /` returns every form field of the upload, or of the sample when
/// nothing was uploaded.
pub async fn analyze_upload(
    State(state): State<ApiState>,
    request: Request,
) -> Result<ExtractionResponse, ApiError> {
    let request_id = Uuid::new_v4();
    let start = Instant::now();

    let upload = read_upload(request).await?;
    let (mode, size) = match &upload {
        Some(u) => (ScanMode::Forms, u.bytes.len()),
        None => (ScanMode::Sample, 0),
    };

    let outcome = state.service.extract(upload.map(|u| u.bytes), None).await;
    record(request_id, mode, size, start, &outcome, item_count);
    Ok(ExtractionResponse(outcome?))
}

/// `POST /filtro/:filtro` returns one field's value as plain text.
pub async fn analyze_field(
    State(state): State<ApiState>,
    Path(filter): Path<String>,
    request: Request,
) -> Result<ExtractionResponse, ApiError> {
    let request_id = Uuid::new_v4();
    let start = Instant::now();

    let upload = read_upload(request).await?;
    let size = upload.as_ref().map_or(0, |u| u.bytes.len());

    let outcome = state
        .service
        .extract(upload.map(|u| u.bytes), Some(&filter))
        .await;
    record(request_id, ScanMode::Filter, size, start, &outcome, item_count);
    Ok(ExtractionResponse(outcome?))
}

/// `POST /porLinha` returns the detected lines joined with `\n`.
pub async fn analyze_lines(
    State(state): State<ApiState>,
    request: Request,
) -> Result<String, ApiError> {
    let request_id = Uuid::new_v4();
    let start = Instant::now();

    let upload = read_upload(request).await?;
    let size = upload.as_ref().map_or(0, |u| u.bytes.len());

    let outcome = match upload {
        Some(upload) => state.service.lines(&upload.bytes).await,
        None => Err(ScanError::MissingDocument),
    };
    record(request_id, ScanMode::Lines, size, start, &outcome, |text| {
        text.lines().count()
    });
    Ok(outcome?)
}

/// `GET /api/health`
pub async fn health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        service: "formscan".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        provider: state.service.provider().to_string(),
    })
}
