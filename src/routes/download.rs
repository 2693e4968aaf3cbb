//! Result file serving.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
};

use crate::AppState;
use crate::error::ServiceError;
use crate::storage;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/download/{filename}", get(download))
}

/// GET /download/:filename - stream a processed image back.
///
/// Results are always JPEG. Segments that are not plain filenames are
/// treated the same as absent files.
async fn download(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    if !storage::is_safe_segment(&filename) {
        return Err(ServiceError::NotFound);
    }

    let path = state.config.results_dir.join(&filename);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| ServiceError::NotFound)?;

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes))
}
