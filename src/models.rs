//! Wire types for the JSON surface.

use serde::Serialize;

/// Placeholder confidence attached to every hit. The cascade engine does
/// not produce calibrated confidence; downstream consumers expect this
/// exact value.
pub const FACE_CONFIDENCE: f64 = 0.95;

#[derive(Debug, Clone, Serialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// One detected face. Ephemeral: built per request, discarded after
/// serialization.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub id: usize,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub bounding_box: BoundingBox,
    pub confidence: f64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectResponse {
    pub status: &'static str,
    pub detections: Vec<Detection>,
    pub original_filename: String,
    pub result_filename: String,
    pub download_url: String,
    pub processing_time_seconds: f64,
}
