use axum::{Json, Router, routing::get};
use std::sync::Arc;

use crate::AppState;
use crate::models::HealthResponse;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

/// GET /health - liveness probe; no failure mode.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "AI Server is running",
    })
}
