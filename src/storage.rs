//! Filename scheme and disk layout for the upload and results areas.
//!
//! Two sibling directories, both created at startup: raw uploads keep the
//! client's (sanitized) filename behind a timestamp prefix, results are
//! named by timestamp alone. Files are immutable once written; nothing
//! deletes them.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;

/// Second-granularity timestamp used in both filename schemes.
pub fn timestamp_now() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Reduce a client-supplied filename to its final path component.
///
/// Uploaded names are joined into a filesystem path, so directory parts
/// and traversal sequences must not survive.
pub fn sanitize_filename(name: &str) -> String {
    let last = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);
    match last {
        "" | "." | ".." => "file".to_string(),
        other => other.to_string(),
    }
}

pub fn upload_filename(timestamp: &str, client_name: &str) -> String {
    format!("original_{}_{}", timestamp, sanitize_filename(client_name))
}

pub fn result_filename(timestamp: &str) -> String {
    format!("masked_{}.jpg", timestamp)
}

/// Whether a download path segment is a plain filename.
///
/// Rejects traversal sequences, separators, and NUL; the results area is
/// flat, so anything else cannot name a file the service produced.
pub fn is_safe_segment(name: &str) -> bool {
    !name.is_empty()
        && !name.contains("..")
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}

pub fn ensure_dirs(upload_dir: &Path, results_dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(upload_dir)?;
    std::fs::create_dir_all(results_dir)?;
    Ok(())
}

/// Persist an upload under the upload directory, returning the full path.
pub async fn save_upload(dir: &Path, filename: &str, data: &[u8]) -> io::Result<PathBuf> {
    let path = dir.join(filename);
    tokio::fs::write(&path, data).await?;
    Ok(path)
}
