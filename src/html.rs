//! Styled single-page HTML report.
use std::fmt::Write as _;

use time::macros::format_description;
use time::OffsetDateTime;

use crate::types::{PortRecord, ScanResult};

/// Vulnerability lines shown before collapsing into "... and N more".
pub const MAX_VULNERABILITIES: usize = 10;

const STYLE: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; }
        body { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); min-height: 100vh; padding: 20px; }
        .container { max-width: 1200px; margin: 0 auto; background: white; border-radius: 15px; box-shadow: 0 20px 60px rgba(0,0,0,0.3); overflow: hidden; }
        .header { background: linear-gradient(90deg, #2c3e50, #4a6491); color: white; padding: 30px; text-align: center; }
        .header h1 { font-size: 2.5em; margin-bottom: 10px; }
        .badge { display: inline-block; padding: 8px 16px; border-radius: 20px; font-size: 0.9em; font-weight: bold; margin-top: 10px; }
        .badge-discovery { background: #17a2b8; }
        .badge-quick { background: #28a745; }
        .badge-comprehensive { background: #ffc107; color: #000; }
        .badge-vulnerability { background: #dc3545; }
        .badge-udp { background: #6f42c1; }
        .info-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(250px, 1fr)); gap: 20px; padding: 30px; background: #f8f9fa; }
        .info-card { background: white; padding: 20px; border-radius: 10px; box-shadow: 0 5px 15px rgba(0,0,0,0.1); border-left: 5px solid #667eea; }
        .results-section { padding: 30px; }
        .stats-box { background: #f8f9fa; border-radius: 10px; padding: 20px; margin-bottom: 30px; }
        .stats-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin-top: 20px; }
        .stat-item { text-align: center; padding: 15px; background: white; border-radius: 8px; box-shadow: 0 3px 10px rgba(0,0,0,0.1); }
        .stat-value { font-size: 2em; font-weight: bold; color: #2c3e50; }
        .stat-label { color: #6c757d; margin-top: 5px; }
        .ports-table { width: 100%; border-collapse: collapse; margin-top: 20px; }
        .ports-table th { background: #2c3e50; color: white; padding: 12px; text-align: left; }
        .ports-table td { padding: 12px; border-bottom: 1px solid #e0e0e0; }
        .ports-table tbody tr { cursor: pointer; }
        .ports-table tbody tr.selected { background: #e8eaf6; }
        .port-open { color: #28a745; font-weight: bold; }
        .vuln-list { background: #fff3cd; border: 1px solid #ffc107; border-radius: 8px; padding: 20px; margin-top: 20px; }
        .vuln-item { padding: 10px; border-bottom: 1px solid #ffc107; }
        .footer { background: #2c3e50; color: white; text-align: center; padding: 20px; margin-top: 30px; }
        @media (max-width: 768px) {
            .info-grid { grid-template-columns: 1fr; }
            .stats-grid { grid-template-columns: 1fr; }
        }
"#;

const SCRIPT: &str = r#"
        document.addEventListener('DOMContentLoaded', function() {
            document.querySelectorAll('.ports-table tbody tr').forEach(row => {
                row.addEventListener('click', function() {
                    this.classList.toggle('selected');
                });
            });
        });
"#;

/// Minimal escaping for text placed in element bodies and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the full HTML document. `now` stamps the "Report Generated" card and report ID.
pub fn render(result: &ScanResult, now: OffsetDateTime) -> String {
    let meta = &result.metadata;
    let stats = &result.statistics;

    let target = escape(&meta.target);
    let profile = escape(&meta.profile);
    let scan_date = escape(meta.timestamp.split('T').next().unwrap_or_default());
    let outcome = if meta.success { "Success" } else { "Failed" };
    let generated = now
        .format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
        .unwrap_or_default();
    let report_id = now
        .format(format_description!("[year][month][day][hour][minute][second]"))
        .unwrap_or_default();

    let mut page = String::new();
    let _ = write!(
        page,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.0.0/css/all.min.css">
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Network Scan Report - {target}</title>
    <style>{STYLE}    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1><i class="fas fa-shield-alt"></i> Network Security Scan Report</h1>
            <div class="badge badge-{profile}">{profile_upper}</div>
        </div>

        <div class="info-grid">
            <div class="info-card">
                <h3><i class="fas fa-bullseye"></i> Target</h3>
                <p>{target}</p>
            </div>
            <div class="info-card">
                <h3><i class="fas fa-calendar-alt"></i> Scan Date</h3>
                <p>{scan_date}</p>
            </div>
            <div class="info-card">
                <h3><i class="fas fa-tasks"></i> Scan Status</h3>
                <p>{outcome}</p>
            </div>
            <div class="info-card">
                <h3><i class="fas fa-clock"></i> Report Generated</h3>
                <p>{generated}</p>
            </div>
        </div>

        <div class="results-section">
            <div class="stats-box">
                <h2><i class="fas fa-chart-bar"></i> Scan Statistics</h2>
                <div class="stats-grid">
                    <div class="stat-item">
                        <div class="stat-value">{hosts_up}</div>
                        <div class="stat-label">Hosts Found</div>
                    </div>
                    <div class="stat-item">
                        <div class="stat-value">{open_ports}</div>
                        <div class="stat-label">Open Ports</div>
                    </div>
                    <div class="stat-item">
                        <div class="stat-value">{vulns}</div>
                        <div class="stat-label">Vulnerabilities</div>
                    </div>
                    <div class="stat-item">
                        <div class="stat-value">{status}</div>
                        <div class="stat-label">Scan Status</div>
                    </div>
                </div>
            </div>

            {ports_html}
            {vulns_html}
        </div>

        <div class="footer">
            <p>Generated by netsec-scan</p>
            <p style="color: #95a5a6; font-size: 0.9em; margin-top: 5px;">
                netsec-scan v{version} &bull; Report ID: {report_id}
            </p>
        </div>
    </div>

    <script>{SCRIPT}    </script>
</body>
</html>
"#,
        profile_upper = profile.to_uppercase(),
        hosts_up = stats.hosts_up,
        open_ports = stats.open_ports.len(),
        vulns = stats.vulnerabilities.len(),
        status = stats.scan_status.title(),
        ports_html = ports_section(&stats.open_ports),
        vulns_html = vulnerabilities_section(&stats.vulnerabilities),
        version = env!("CARGO_PKG_VERSION"),
    );
    page
}

fn ports_section(ports: &[PortRecord]) -> String {
    let mut html = String::from(r#"<h2><i class="fas fa-plug"></i> Open Ports</h2>"#);
    if ports.is_empty() {
        html.push_str("<p>No open ports found.</p>");
        return html;
    }

    html.push_str(r#"<table class="ports-table">"#);
    html.push_str("<thead><tr><th>Port</th><th>Protocol</th><th>State</th><th>Service</th></tr></thead>");
    html.push_str("<tbody>");
    for p in ports {
        let state_class = if p.state == "open" { "port-open" } else { "" };
        let _ = write!(
            html,
            r#"<tr><td>{}</td><td>{}</td><td class="{}">{}</td><td>{}</td></tr>"#,
            escape(&p.port),
            escape(&p.protocol),
            state_class,
            escape(&p.state),
            escape(&p.service),
        );
    }
    html.push_str("</tbody></table>");
    html
}

fn vulnerabilities_section(vulns: &[String]) -> String {
    if vulns.is_empty() {
        return String::new();
    }

    let mut html = String::from(
        r#"<h2><i class="fas fa-exclamation-triangle"></i> Potential Vulnerabilities</h2><div class="vuln-list">"#,
    );
    for v in vulns.iter().take(MAX_VULNERABILITIES) {
        let _ = write!(html, r#"<div class="vuln-item">{}</div>"#, escape(v));
    }
    if vulns.len() > MAX_VULNERABILITIES {
        let _ = write!(
            html,
            r#"<div class="vuln-item">... and {} more</div>"#,
            vulns.len() - MAX_VULNERABILITIES
        );
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ScanMetadata, ScanStatistics, ScanStatus};
    use time::macros::datetime;

    fn result_with(ports: Vec<PortRecord>, vulns: Vec<String>) -> ScanResult {
        ScanResult {
            metadata: ScanMetadata {
                target: "10.0.0.5".into(),
                profile: "quick".into(),
                timestamp: "2025-03-04T05:06:07+00:00".into(),
                command: "nmap -sS -T4 -F 10.0.0.5".into(),
                success: true,
                return_code: Some(0),
                error: None,
            },
            raw_output: Some(String::new()),
            raw_errors: None,
            statistics: ScanStatistics {
                hosts_up: 1,
                open_ports: ports,
                scan_status: ScanStatus::HostFound,
                vulnerabilities: vulns,
                ..ScanStatistics::default()
            },
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
    }

    #[test]
    fn page_has_badge_stats_and_toggle_script() {
        let page = render(&result_with(Vec::new(), Vec::new()), datetime!(2025-03-04 05:06:07 UTC));
        assert!(page.contains(r#"class="badge badge-quick">QUICK<"#));
        assert!(page.contains("<p>2025-03-04</p>"));
        assert!(page.contains("Host Found"));
        assert!(page.contains("No open ports found."));
        assert!(page.contains("Report ID: 20250304050607"));
        assert!(page.contains("classList.toggle('selected')"));
        assert!(!page.contains("Potential Vulnerabilities"));
    }

    #[test]
    fn port_rows_and_vulnerability_overflow() {
        let ports = vec![PortRecord {
            port: "443".into(),
            protocol: "tcp".into(),
            state: "open".into(),
            service: "https".into(),
            version: None,
        }];
        let vulns: Vec<String> = (0..12).map(|i| format!("CVE-2024-{i:04}")).collect();
        let page = render(&result_with(ports, vulns), datetime!(2025-01-01 00:00:00 UTC));
        assert!(page.contains(r#"<td>443</td><td>tcp</td><td class="port-open">open</td><td>https</td>"#));
        assert!(page.contains("CVE-2024-0009"));
        assert!(!page.contains("CVE-2024-0010"));
        assert!(page.contains("... and 2 more"));
    }
}
