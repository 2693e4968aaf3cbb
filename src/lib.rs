pub mod config;
pub mod detector;
pub mod error;
pub mod models;
pub mod processing;
pub mod routes;
pub mod storage;

use std::sync::Arc;

use crate::config::Config;
use crate::detector::FaceDetector;
use crate::processing::Redactor;

/// Shared state threaded through every handler.
pub struct AppState {
    pub config: Config,
    pub redactor: Redactor,
}

impl AppState {
    pub fn new(config: Config, detector: Arc<dyn FaceDetector>) -> Self {
        let redactor = Redactor::new(detector, config.blur_sigma, config.results_dir.clone());
        Self { config, redactor }
    }
}
