pub mod detect;
pub mod download;
pub mod health;

use axum::Router;
use std::sync::Arc;

use crate::AppState;

/// Build all routes for the service
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::routes())
        .merge(detect::routes())
        .merge(download::routes())
}
