//! Human-readable output on stdout.
use std::fmt::Write as _;
use std::time::Duration;

use crate::profiles::{self, ScanProfile};
use crate::report::ReportPaths;
use crate::types::ScanResult;

const RULE: &str = "============================================================";
const MAX_PORTS: usize = 5;
const MAX_SERVICE_CHARS: usize = 30;
const MAX_VULNS: usize = 3;
const MAX_VULN_CHARS: usize = 60;

/// Cut `s` to `max` characters, replacing the tail with "..." when it is longer.
pub fn elide(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Abbreviated summary of a finished scan.
pub fn render_summary(result: &ScanResult) -> String {
    let stats = &result.statistics;
    let mut out = String::new();

    let _ = writeln!(out, "\n{RULE}\nSCAN RESULTS\n{RULE}");

    if stats.hosts_up > 0 {
        let _ = writeln!(out, "Hosts Found: {}", stats.hosts_up);
        if stats.open_ports.is_empty() {
            out.push_str("No open ports found\n");
        } else {
            let _ = writeln!(out, "\nOpen Ports ({}):", stats.open_ports.len());
            for p in stats.open_ports.iter().take(MAX_PORTS) {
                let _ = writeln!(
                    out,
                    "  - Port {}/{}: {}",
                    p.port,
                    p.protocol,
                    elide(&p.service, MAX_SERVICE_CHARS)
                );
            }
            if stats.open_ports.len() > MAX_PORTS {
                let _ = writeln!(out, "  ... and {} more", stats.open_ports.len() - MAX_PORTS);
            }
        }
    } else {
        out.push_str("No hosts found\n");
    }

    if !stats.vulnerabilities.is_empty() {
        let _ = writeln!(
            out,
            "\nPotential Vulnerabilities Found: {}",
            stats.vulnerabilities.len()
        );
        for v in stats.vulnerabilities.iter().take(MAX_VULNS) {
            let _ = writeln!(out, "  - {}", elide(v, MAX_VULN_CHARS));
        }
        if stats.vulnerabilities.len() > MAX_VULNS {
            let _ = writeln!(out, "  ... and {} more", stats.vulnerabilities.len() - MAX_VULNS);
        }
    }

    let _ = writeln!(out, "\nScan Status: {}", stats.scan_status.title());
    out.push_str(RULE);
    out
}

pub fn print_summary(result: &ScanResult) {
    println!("{}", render_summary(result));
}

pub fn print_scan_banner(target: &str, profile: &ScanProfile, command: &str) {
    println!("\n{RULE}");
    println!("EXECUTING: {} SCAN", profile.name.to_uppercase());
    println!("{RULE}");
    println!("Target: {target}");
    println!("Profile: {}", profile.description);
    println!("Estimated time: {}", profile.duration);
    println!("Command: {command}");
    println!("{RULE}\n");
}

pub fn print_timeout(timeout: Duration) {
    println!("\nScan timed out after {} minutes", timeout.as_secs() / 60);
}

pub fn print_report_paths(paths: &ReportPaths) {
    println!("\nReports saved:");
    for path in paths.all() {
        println!("  {}", path.display());
    }
}

/// Profile table, one profile per line.
pub fn render_profiles() -> String {
    let mut out = String::from("Scan profiles:\n");
    for p in profiles::all() {
        let _ = writeln!(
            out,
            "  {:<14} {:<10} {:<24} {}",
            p.name, p.duration, p.flags, p.description
        );
    }
    out
}
