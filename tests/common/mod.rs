#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use faceblur::config::Config;
use faceblur::detector::{FaceBox, FaceDetector};
use faceblur::{AppState, routes, storage};

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Detector stub that reports a fixed set of boxes for every frame.
pub struct StubDetector(pub Vec<FaceBox>);

impl FaceDetector for StubDetector {
    fn detect(&self, _gray: &[u8], _width: u32, _height: u32) -> Vec<FaceBox> {
        self.0.clone()
    }
}

/// Build the application router against temp upload/results directories,
/// with the given stub detection output. The `TempDir` must be kept alive
/// for the duration of the test.
pub fn build_test_app(boxes: Vec<FaceBox>) -> (Router, TempDir) {
    let tmp = TempDir::new().unwrap();
    let config = Config {
        upload_dir: tmp.path().join("uploads"),
        results_dir: tmp.path().join("results"),
        ..Config::default()
    };
    storage::ensure_dirs(&config.upload_dir, &config.results_dir).unwrap();

    let state = Arc::new(AppState::new(config, Arc::new(StubDetector(boxes))));
    let app = routes::build_routes().with_state(state);
    (app, tmp)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Build a multipart POST with a single field. `filename: None` omits the
/// filename parameter entirely; `Some("")` sends an empty one.
pub fn multipart_request(
    uri: &str,
    field_name: &str,
    filename: Option<&str>,
    content: &[u8],
) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    let disposition = match filename {
        Some(name) => format!(
            "Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{name}\"\r\n"
        ),
        None => format!("Content-Disposition: form-data; name=\"{field_name}\"\r\n"),
    };
    body.extend_from_slice(disposition.as_bytes());
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

/// A grey 200×200 PNG, encoded in memory.
pub fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(200, 200, image::Rgb([180, 180, 180]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Assert a result filename looks like `masked_YYYYMMDD_HHMMSS.jpg`.
pub fn assert_result_filename(name: &str) {
    assert!(
        name.starts_with("masked_") && name.ends_with(".jpg"),
        "unexpected result filename: {name}"
    );
    let stamp = &name["masked_".len()..name.len() - ".jpg".len()];
    assert_eq!(stamp.len(), 15, "unexpected timestamp in {name}");
    assert_eq!(stamp.as_bytes()[8], b'_');
    assert_eq!(
        stamp.chars().filter(|c| c.is_ascii_digit()).count(),
        14,
        "unexpected timestamp in {name}"
    );
}
