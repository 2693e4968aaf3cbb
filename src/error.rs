//! Service error type and its fixed mapping to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Every failure the service can surface, mapped one-to-one onto a status
/// code by [`IntoResponse`]. Handlers return this directly.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Multipart upload without a `file` field.
    #[error("no file in request")]
    MissingFile,

    /// `file` field present but unnamed.
    #[error("uploaded file has an empty filename")]
    EmptyFilename,

    /// Multipart payload that could not be read.
    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    /// The uploaded bytes did not decode as an image.
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// The result buffer could not be encoded as JPEG.
    #[error("failed to encode image: {0}")]
    Encode(String),

    /// Download of a filename that does not exist under the results area.
    #[error("file not found")]
    NotFound,

    /// The face detection model could not be loaded.
    #[error("failed to load face model: {0}")]
    Model(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::MissingFile
            | ServiceError::EmptyFilename
            | ServiceError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            // Decode failures ride the generic 500 path rather than a 400;
            // clients depend on the existing behaviour.
            ServiceError::Decode(_)
            | ServiceError::Encode(_)
            | ServiceError::Model(_)
            | ServiceError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_input_errors_map_to_400() {
        assert_eq!(ServiceError::MissingFile.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ServiceError::EmptyFilename.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_result_maps_to_404() {
        assert_eq!(ServiceError::NotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn decode_failure_maps_to_500() {
        let err = ServiceError::Decode("bad magic".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
