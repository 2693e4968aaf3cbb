//! Upload-and-redact endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Multipart, State},
    routing::post,
};
use bytes::Bytes;

use crate::AppState;
use crate::error::ServiceError;
use crate::models::DetectResponse;
use crate::storage;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/detect", post(detect))
}

/// POST /detect - multipart upload with a single `file` field.
///
/// Persists the upload, runs the redaction routine synchronously, and
/// answers with the hit list plus a relative download path for the
/// processed image.
async fn detect(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<DetectResponse>, ServiceError> {
    let (client_name, data) = read_file_field(multipart).await?;
    if client_name.is_empty() {
        return Err(ServiceError::EmptyFilename);
    }

    let timestamp = storage::timestamp_now();
    let original_filename = storage::upload_filename(&timestamp, &client_name);
    let upload_path = storage::save_upload(&state.config.upload_dir, &original_filename, &data).await?;

    let started = Instant::now();
    let outcome = state.redactor.redact_file(&upload_path)?;
    let elapsed = started.elapsed().as_secs_f64();
    let processing_time_seconds = (elapsed * 100.0).round() / 100.0;

    tracing::info!(
        faces = outcome.detections.len(),
        seconds = processing_time_seconds,
        file = %original_filename,
        "processed upload"
    );

    let download_url = format!("/download/{}", outcome.result_filename);
    Ok(Json(DetectResponse {
        status: "success",
        detections: outcome.detections,
        original_filename,
        result_filename: outcome.result_filename,
        download_url,
        processing_time_seconds,
    }))
}

/// Pull the first `file` field out of the form; other fields are ignored.
async fn read_file_field(mut multipart: Multipart) -> Result<(String, Bytes), ServiceError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::InvalidUpload(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ServiceError::InvalidUpload(e.to_string()))?;
        return Ok((filename, data));
    }
    Err(ServiceError::MissingFile)
}
