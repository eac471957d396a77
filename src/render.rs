//! Rebuild HTML reports from JSON reports written earlier.
use std::fs;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use tracing::{info, warn};

use crate::error::Result;
use crate::html;
use crate::types::ScanResult;

/// `scan.json` -> `scan_report.html`, next to the input.
pub fn html_path_for(json_path: &Path) -> PathBuf {
    let stem = json_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    json_path.with_file_name(format!("{stem}_report.html"))
}

/// Render one JSON report to HTML and return the written path.
pub fn render_json_file(json_path: &Path) -> Result<PathBuf> {
    let content = fs::read_to_string(json_path)?;
    let result: ScanResult = serde_json::from_str(&content)?;
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());

    let out = html_path_for(json_path);
    fs::write(&out, html::render(&result, now))?;
    info!(input = %json_path.display(), output = %out.display(), "rendered HTML report");
    Ok(out)
}

/// Render every `*.json` report directly inside `dir`, in file-name order.
///
/// Files that fail to parse are logged and skipped.
pub fn render_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut inputs: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    inputs.sort();

    let mut written = Vec::new();
    for input in inputs {
        match render_json_file(&input) {
            Ok(out) => written.push(out),
            Err(e) => {
                warn!(input = %input.display(), error = %e, "skipping report");
                eprintln!("Failed to render {}: {e}", input.display());
            }
        }
    }
    Ok(written)
}

/// Render a single file, or every report in a directory.
pub fn render_path(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_dir() {
        render_directory(path)
    } else {
        Ok(vec![render_json_file(path)?])
    }
}
