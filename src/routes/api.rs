use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::certificate::{self, CertificateRequest};
use crate::error::ApiError;
use crate::state::AppState;
use crate::storage;

/// Validates the request, renders the certificate, stages it on disk,
/// returns it as an attachment and removes the staged file.
pub async fn generate_pdf(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CertificateRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let certificate = request.validate()?;

    let issued_at = Utc::now();
    let bytes = certificate::generate(&certificate, &state.config.branding, issued_at)
        .map_err(|e| ApiError::internal("Error generating PDF", e))?;

    let artifact = storage::stage(
        &state.config.artifact_dir,
        issued_at.timestamp_millis(),
        &bytes,
    )
    .await
    .map_err(|e| ApiError::internal("Error generating PDF", e))?;

    let filename = artifact.filename().to_string();
    let delivered = artifact.read().await;
    artifact.cleanup().await;
    let body = delivered.map_err(|e| ApiError::internal("Error sending PDF file", e))?;

    tracing::info!(
        "Generated {} for {} ({} bytes)",
        filename,
        certificate.student_name,
        body.len()
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response())
}

pub async fn generate_pdf_hint() -> Json<Value> {
    Json(json!({
        "error": "This endpoint only accepts POST requests. Please use the form to generate a PDF certificate.",
        "message": "Use POST method with student data to generate PDF"
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Enrollment Certificate API is running"
    }))
}
