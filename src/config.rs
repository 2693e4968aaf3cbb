//! Process configuration, built once at startup from environment variables.

use std::env;
use std::path::PathBuf;

use crate::detector::DetectorParams;

const DEFAULT_PORT: u16 = 5001;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_RESULTS_DIR: &str = "results";
const DEFAULT_MODEL_PATH: &str = "models/seeta_fd_frontal_v1.0.bin";
const DEFAULT_BLUR_SIGMA: f32 = 30.0;
const MAX_UPLOAD_SIZE: usize = 50 * 1024 * 1024; // 50 MB limit for uploads

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory raw uploads are written to.
    pub upload_dir: PathBuf,
    /// Directory processed results are written to.
    pub results_dir: PathBuf,
    /// SeetaFace model file loaded at startup.
    pub model_path: PathBuf,
    pub detector: DetectorParams,
    /// Gaussian sigma applied to each detected region. Large on purpose:
    /// the blur is a privacy control and must not leave faces recoverable.
    pub blur_sigma: f32,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_parsed("PORT", DEFAULT_PORT),
            upload_dir: env_path("UPLOAD_DIR", DEFAULT_UPLOAD_DIR),
            results_dir: env_path("RESULTS_DIR", DEFAULT_RESULTS_DIR),
            model_path: env_path("FACE_MODEL_PATH", DEFAULT_MODEL_PATH),
            detector: DetectorParams::default(),
            blur_sigma: env_parsed("BLUR_SIGMA", DEFAULT_BLUR_SIGMA),
            max_upload_bytes: env_parsed("MAX_UPLOAD_BYTES", MAX_UPLOAD_SIZE),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            detector: DetectorParams::default(),
            blur_sigma: DEFAULT_BLUR_SIGMA,
            max_upload_bytes: MAX_UPLOAD_SIZE,
        }
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_path(key: &str, default: &str) -> PathBuf {
    env::var(key).map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_service_contract() {
        let config = Config::default();
        assert_eq!(config.port, 5001);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.results_dir, PathBuf::from("results"));
        assert_eq!(config.blur_sigma, 30.0);
    }

    #[test]
    fn default_detector_params() {
        let params = DetectorParams::default();
        assert_eq!(params.scale_factor, 1.1);
        assert_eq!(params.min_neighbors, 5);
        assert_eq!(params.min_size, 30);
    }
}
