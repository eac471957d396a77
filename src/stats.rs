//! Best-effort statistics from nmap's human-readable output.
//!
//! This is a line classifier, not a parser for a grammar. Rules are applied in
//! a fixed order per line and later lines overwrite earlier verdicts, so the
//! result depends on line order. Report consumers rely on these exact rules,
//! including their imprecisions:
//!
//! - a port line's lookahead starts at the *first* line in the output that is
//!   textually identical to it, so repeated identical port lines share one
//!   lookahead window;
//! - the lookahead may pick up neighbouring port lines or script output as a
//!   service or version string;
//! - any line naming both "host" and "up" counts as a live host.
use clap::ValueEnum;

use crate::types::{PortRecord, ScanStatistics, ScanStatus};

const REPORT_PHRASE: &str = "scan report for";
const VULN_KEYWORDS: [&str; 5] = ["vuln", "cve-", "vulnerability", "risk", "exploit"];
const LOOKAHEAD_EXCLUDED: [&str; 4] = ["nmap", "port", "service", "state"];
const LOOKAHEAD_LINES: usize = 3;
const ZERO_HOSTS: &str = "0 hosts up";

/// Which host-status rule ordering to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExtractionMode {
    /// "host is up", then "0 hosts up"/"host seems down", then the loose
    /// "host" + "up" test. Lets `Nmap done: ... (0 hosts up)` read as down;
    /// "0 hosts up" only counts when no digit precedes it.
    #[default]
    Corrected,
    /// "host is up" or the loose test first, down markers last. The loose
    /// test shadows "0 hosts up", so that line reads as a live host.
    Literal,
}

/// Extract statistics with the default [`ExtractionMode`].
pub fn extract_statistics(output: &str) -> ScanStatistics {
    extract_statistics_with(output, ExtractionMode::default())
}

pub fn extract_statistics_with(output: &str, mode: ExtractionMode) -> ScanStatistics {
    let mut stats = ScanStatistics::default();
    if output.is_empty() {
        stats.scan_status = ScanStatus::NoOutput;
        return stats;
    }

    let lines: Vec<&str> = output.split('\n').collect();
    let mut in_port_section = false;

    for &line in &lines {
        let lower = line.to_lowercase();

        if let Some(status) = host_status(&lower, mode) {
            match status {
                ScanStatus::HostFound => {
                    stats.hosts_up = 1;
                    stats.last_host = host_after_phrase(line);
                }
                ScanStatus::HostUp => stats.hosts_up = 1,
                _ => stats.hosts_up = 0,
            }
            stats.scan_status = status;
        }

        if lower.contains("port") && lower.contains("state") && lower.contains("service") {
            in_port_section = true;
            continue;
        }

        let blank = line.trim().is_empty();
        if in_port_section && !blank && !line.starts_with("Nmap") && !line.starts_with('|') {
            if let Some(record) = parse_port_line(line, &lines) {
                stats.open_ports.push(record);
            }
        }

        if in_port_section
            && (line.starts_with("Nmap") || lower.contains("read data files") || blank)
        {
            in_port_section = false;
        }

        if !blank && VULN_KEYWORDS.iter().any(|k| lower.contains(k)) {
            stats.vulnerabilities.push(line.trim().to_string());
        }
    }

    if stats.hosts_up == 0 && !stats.open_ports.is_empty() {
        stats.hosts_up = 1;
        stats.scan_status = ScanStatus::ImpliedHostUp;
    }

    if stats.scan_status == ScanStatus::Unknown {
        let lower = output.to_lowercase();
        if lower.contains("scan report") {
            stats.scan_status = ScanStatus::Completed;
        } else if lower.contains("nmap done") {
            stats.scan_status = ScanStatus::CompletedNoHosts;
        }
    }

    stats
}

fn host_status(lower: &str, mode: ExtractionMode) -> Option<ScanStatus> {
    if lower.contains(REPORT_PHRASE) {
        return Some(ScanStatus::HostFound);
    }
    let explicit_up = lower.contains("host is up");
    let loose_up = lower.contains("up") && lower.contains("host");
    let zero_hosts = match mode {
        ExtractionMode::Literal => lower.contains(ZERO_HOSTS),
        ExtractionMode::Corrected => reports_zero_hosts(lower),
    };
    let down = zero_hosts || lower.contains("host seems down");

    match mode {
        ExtractionMode::Literal if explicit_up || loose_up => Some(ScanStatus::HostUp),
        ExtractionMode::Corrected if explicit_up => Some(ScanStatus::HostUp),
        _ if down => Some(ScanStatus::HostDown),
        ExtractionMode::Corrected if loose_up => Some(ScanStatus::HostUp),
        _ => None,
    }
}

/// "0 hosts up" as a whole count, so "(10 hosts up)" does not match.
fn reports_zero_hosts(lower: &str) -> bool {
    lower
        .match_indices(ZERO_HOSTS)
        .any(|(i, _)| i == 0 || !lower.as_bytes()[i - 1].is_ascii_digit())
}

fn host_after_phrase(line: &str) -> Option<String> {
    // ASCII lowering keeps byte offsets aligned with `line`.
    let idx = line.to_ascii_lowercase().find(REPORT_PHRASE)?;
    let host = line[idx + REPORT_PHRASE.len()..].trim();
    (!host.is_empty()).then(|| host.to_string())
}

/// Turn `80/tcp open http ...` into a record when the state is open.
fn parse_port_line(line: &str, lines: &[&str]) -> Option<PortRecord> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 2 {
        return None;
    }
    let first = parts[0].to_lowercase();
    if !first.contains("/tcp") && !first.contains("/udp") {
        return None;
    }
    let state = parts[1];
    if state.to_lowercase() != "open" {
        return None;
    }

    let mut pieces = parts[0].split('/');
    let mut record = PortRecord {
        port: pieces.next().unwrap_or_default().to_string(),
        protocol: pieces.next().unwrap_or("tcp").to_string(),
        state: state.to_string(),
        service: parts.get(2).copied().unwrap_or("unknown").to_string(),
        version: None,
    };

    let idx = lines.iter().position(|l| *l == line)?;
    for next in lines.iter().skip(idx + 1).take(LOOKAHEAD_LINES) {
        let next = next.trim();
        if next.is_empty() {
            continue;
        }
        let next_lower = next.to_lowercase();
        if LOOKAHEAD_EXCLUDED.iter().any(|w| next_lower.contains(w)) {
            continue;
        }
        if record.service == "unknown" {
            record.service = next.to_string();
        } else if next_lower.contains("version") || next_lower.contains("product") {
            record.version = Some(next.to_string());
        }
    }

    Some(record)
}
