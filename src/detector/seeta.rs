use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::{DetectorParams, FaceBox, FaceDetector};
use crate::error::ServiceError;

/// Face detector backed by the `rustface` crate (SeetaFace funnel cascade).
///
/// The model is read once at construction; `rustface` detectors are not
/// `Sync`, so each `detect` call builds a fresh detector from the shared
/// model.
pub struct SeetaDetector {
    model: rustface::Model,
    params: DetectorParams,
}

impl SeetaDetector {
    /// Load a SeetaFace model from disk.
    pub fn from_file(path: &Path, params: DetectorParams) -> Result<Self, ServiceError> {
        let file = File::open(path).map_err(|e| {
            ServiceError::Model(format!("cannot open {}: {}", path.display(), e))
        })?;
        let model = rustface::read_model(BufReader::new(file))
            .map_err(|e| ServiceError::Model(e.to_string()))?;
        Ok(Self { model, params })
    }
}

impl FaceDetector for SeetaDetector {
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<FaceBox> {
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        // SeetaFace has no neighbor-vote knob; the stage score threshold
        // plays that role. The pyramid factor is the inverse of the scale
        // step (a step of 1.1 means each level is ~0.91x the previous).
        detector.set_min_face_size(self.params.min_size);
        detector.set_score_thresh(f64::from(self.params.min_neighbors));
        detector.set_pyramid_scale_factor(1.0 / self.params.scale_factor);
        detector.set_slide_window_step(4, 4);

        let faces = detector.detect(&rustface::ImageData::new(gray, width, height));

        faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceBox {
                    x: bbox.x(),
                    y: bbox.y(),
                    width: bbox.width(),
                    height: bbox.height(),
                }
            })
            .collect()
    }
}
