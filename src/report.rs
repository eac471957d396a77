//! Writes the four per-scan report files.
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::debug;

use crate::error::Result;
use crate::html;
use crate::types::ScanResult;

const RULE: &str = "============================================================";

/// Locations of the files produced for one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub text: PathBuf,
    pub json: PathBuf,
    pub markdown: PathBuf,
    pub html: PathBuf,
}

impl ReportPaths {
    /// `<dir>/<base>.{txt,json,md}` and `<dir>/<base>_report.html`.
    pub fn new(dir: &Path, base: &str) -> Self {
        Self {
            text: dir.join(format!("{base}.txt")),
            json: dir.join(format!("{base}.json")),
            markdown: dir.join(format!("{base}.md")),
            html: dir.join(format!("{base}_report.html")),
        }
    }

    pub fn all(&self) -> [&Path; 4] {
        [&self.text, &self.json, &self.markdown, &self.html]
    }
}

/// Replace path separators and dots so the target can be used in a file name.
pub fn sanitize_target(target: &str) -> String {
    target.replace(['/', '\\', '.'], "_")
}

/// `<sanitized-target>_<profile>_<YYYYMMDD_HHMMSS>`.
pub fn base_name(target: &str, profile: &str, at: OffsetDateTime) -> String {
    let stamp = at
        .format(format_description!("[year][month][day]_[hour][minute][second]"))
        .unwrap_or_else(|_| "00000000_000000".to_string());
    format!("{}_{profile}_{stamp}", sanitize_target(target))
}

/// Write all four reports for `result` into `dir`, creating it if needed.
pub fn write_reports(result: &ScanResult, dir: &Path) -> Result<ReportPaths> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    write_reports_at(result, dir, now)
}

/// Same as [`write_reports`] with an explicit clock reading.
pub fn write_reports_at(result: &ScanResult, dir: &Path, now: OffsetDateTime) -> Result<ReportPaths> {
    fs::create_dir_all(dir)?;
    let base = base_name(&result.metadata.target, &result.metadata.profile, now);
    let paths = ReportPaths::new(dir, &base);

    fs::write(&paths.text, render_text(result))?;
    fs::write(&paths.json, render_json(result)?)?;
    fs::write(&paths.markdown, render_markdown(result))?;
    fs::write(&paths.html, html::render(result, now))?;

    debug!(dir = %dir.display(), %base, "reports written");
    Ok(paths)
}

/// Banner header followed by the raw transcript.
pub fn render_text(result: &ScanResult) -> String {
    let meta = &result.metadata;
    let mut out = String::new();
    out.push_str("Network Security Scan Report\n");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Target: {}", meta.target);
    let _ = writeln!(out, "Profile: {}", meta.profile);
    let _ = writeln!(out, "Timestamp: {}", meta.timestamp);
    let _ = writeln!(out, "Command: {}", meta.command);
    let _ = writeln!(out, "Success: {}", meta.success);
    let _ = writeln!(out, "{RULE}\n");

    match result.raw_output.as_deref() {
        Some(stdout) if !stdout.is_empty() => out.push_str(stdout),
        _ => out.push_str("No scan output available\n"),
    }

    if let Some(stderr) = result.raw_errors.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(out, "\n{RULE}\nERRORS:\n{RULE}\n");
        out.push_str(stderr);
    }
    out
}

/// Pretty JSON with four-space indentation.
pub fn render_json(result: &ScanResult) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    result.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn render_markdown(result: &ScanResult) -> String {
    let meta = &result.metadata;
    let stats = &result.statistics;
    let mut md = String::new();

    md.push_str("# Network Security Scan Report\n\n");
    md.push_str("## Scan Details\n");
    let _ = writeln!(md, "- **Target**: {}", meta.target);
    let _ = writeln!(md, "- **Profile**: {}", meta.profile);
    let _ = writeln!(md, "- **Timestamp**: {}", meta.timestamp);
    let _ = writeln!(md, "- **Status**: {}", if meta.success { "Success" } else { "Failed" });
    let _ = writeln!(md, "- **Command**: `{}`\n", meta.command);

    md.push_str("## Statistics\n");
    let _ = writeln!(md, "- **Hosts Found**: {}", stats.hosts_up);
    let _ = writeln!(md, "- **Open Ports**: {}", stats.open_ports.len());
    let _ = writeln!(md, "- **Scan Status**: {}\n", stats.scan_status);

    if !stats.open_ports.is_empty() {
        md.push_str("## Open Ports\n");
        md.push_str("| Port | Protocol | State | Service |\n");
        md.push_str("|------|----------|-------|---------|\n");
        for p in &stats.open_ports {
            let _ = writeln!(
                md,
                "| {} | {} | {} | {} |",
                p.port, p.protocol, p.state, p.service
            );
        }
        md.push('\n');
    }

    if !stats.vulnerabilities.is_empty() {
        md.push_str("## Potential Vulnerabilities\n");
        for v in &stats.vulnerabilities {
            let _ = writeln!(md, "- {v}");
        }
        md.push('\n');
    }

    md.push_str("## Raw Output\n");
    md.push_str("Full scan output is available in the corresponding .txt file.\n");
    md
}
