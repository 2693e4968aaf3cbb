//! The detection-and-redaction routine.
//!
//! Decode → grayscale → detect → blur each hit → outline → JPEG to the
//! results area. Everything here is synchronous and blocks the calling
//! task for the full duration of the image work.

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use image::{ImageFormat, ImageReader, Rgb, RgbImage, imageops};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::detector::{FaceBox, FaceDetector};
use crate::error::ServiceError;
use crate::models::{BoundingBox, Detection, FACE_CONFIDENCE};
use crate::storage;

/// Outline drawn around each redacted region, on top of the blur. The
/// outline is an audit marker showing where redaction occurred.
const OUTLINE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const OUTLINE_THICKNESS: i32 = 2;

#[derive(Debug)]
pub struct RedactionOutcome {
    /// Hits in the order the engine reported them.
    pub detections: Vec<Detection>,
    /// Filename of the processed image under the results area.
    pub result_filename: String,
}

/// Owns the detector and the redaction policy; one instance serves every
/// request.
pub struct Redactor {
    detector: Arc<dyn FaceDetector>,
    blur_sigma: f32,
    results_dir: PathBuf,
}

impl Redactor {
    pub fn new(detector: Arc<dyn FaceDetector>, blur_sigma: f32, results_dir: PathBuf) -> Self {
        Self {
            detector,
            blur_sigma,
            results_dir,
        }
    }

    /// Run the full pipeline on an image file already on disk.
    ///
    /// Zero faces is success: the result file is still written (re-encoded
    /// as JPEG, which may introduce compression artifacts) and the hit
    /// list is empty. A file that does not decode is an error, distinct
    /// from "no faces found".
    pub fn redact_file(&self, path: &std::path::Path) -> Result<RedactionOutcome, ServiceError> {
        let data = std::fs::read(path)?;
        let img = ImageReader::new(Cursor::new(&data))
            .with_guessed_format()?
            .decode()
            .map_err(|e| ServiceError::Decode(e.to_string()))?;

        // Luminance is taken before any blur is written back, so every
        // region is detected against the original pixels.
        let gray = img.to_luma8();
        let mut frame = img.to_rgb8();

        let raw = self
            .detector
            .detect(gray.as_raw(), gray.width(), gray.height());
        tracing::info!(faces = raw.len(), "detection pass complete");

        let mut detections = Vec::with_capacity(raw.len());
        for face in &raw {
            let Some(bbox) = clamp_box(face, frame.width(), frame.height()) else {
                continue;
            };
            self.blur_region(&mut frame, &bbox);
            draw_outline(&mut frame, &bbox);
            detections.push(Detection {
                id: detections.len(),
                kind: "face",
                bounding_box: bbox,
                confidence: FACE_CONFIDENCE,
            });
        }

        let result_filename = storage::result_filename(&storage::timestamp_now());
        let mut encoded = Cursor::new(Vec::new());
        frame
            .write_to(&mut encoded, ImageFormat::Jpeg)
            .map_err(|e| ServiceError::Encode(e.to_string()))?;
        std::fs::write(self.results_dir.join(&result_filename), encoded.into_inner())?;

        Ok(RedactionOutcome {
            detections,
            result_filename,
        })
    }

    fn blur_region(&self, frame: &mut RgbImage, bbox: &BoundingBox) {
        let region = imageops::crop_imm(
            frame,
            bbox.x as u32,
            bbox.y as u32,
            bbox.width,
            bbox.height,
        )
        .to_image();
        let blurred = imageops::blur(&region, self.blur_sigma);
        imageops::replace(frame, &blurred, i64::from(bbox.x), i64::from(bbox.y));
    }
}

/// Clip an engine-reported box to the frame. Returns `None` when nothing
/// of the box lies inside the image.
fn clamp_box(face: &FaceBox, width: u32, height: u32) -> Option<BoundingBox> {
    let x0 = i64::from(face.x).clamp(0, i64::from(width));
    let y0 = i64::from(face.y).clamp(0, i64::from(height));
    let x1 = (i64::from(face.x) + i64::from(face.width)).clamp(0, i64::from(width));
    let y1 = (i64::from(face.y) + i64::from(face.height)).clamp(0, i64::from(height));
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(BoundingBox {
        x: x0 as i32,
        y: y0 as i32,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    })
}

fn draw_outline(frame: &mut RgbImage, bbox: &BoundingBox) {
    // Thickness by concentric rects, growing outward from the box edge.
    for offset in 0..OUTLINE_THICKNESS {
        let rect = Rect::at(bbox.x - offset, bbox.y - offset).of_size(
            bbox.width + 2 * offset as u32,
            bbox.height + 2 * offset as u32,
        );
        draw_hollow_rect_mut(frame, rect, OUTLINE_COLOR);
    }
}
