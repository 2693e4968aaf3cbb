use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use faceblur::config::Config;
use faceblur::detector::SeetaDetector;
use faceblur::{AppState, routes, storage};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    storage::ensure_dirs(&config.upload_dir, &config.results_dir)
        .expect("Failed to create upload/results directories");

    let detector = SeetaDetector::from_file(&config.model_path, config.detector.clone())
        .unwrap_or_else(|e| panic!("Failed to load face model: {}", e));
    tracing::info!(model = %config.model_path.display(), "face model loaded");

    let addr = format!("{}:{}", config.host, config.port);
    let max_upload = config.max_upload_bytes;
    let state = Arc::new(AppState::new(config, Arc::new(detector)));

    // Browser clients upload from arbitrary origins; nothing here is
    // credentialed, so the CORS policy is wide open.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::build_routes()
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {}: {}", addr, e));

    tracing::info!("listening on http://{}", addr);
    axum::serve(listener, app).await.expect("Server failed");
}
