use std::fmt;

use serde::{Deserialize, Serialize};

/// One open port pulled out of the port table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PortRecord {
    /// Kept as text, exactly as the tool printed it.
    pub port: String,
    pub protocol: String,
    pub state: String,
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Overall verdict inferred from the output text.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    #[default]
    Unknown,
    HostFound,
    HostUp,
    HostDown,
    ImpliedHostUp,
    Completed,
    CompletedNoHosts,
    Timeout,
    NoOutput,
}

impl ScanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Unknown => "unknown",
            ScanStatus::HostFound => "host_found",
            ScanStatus::HostUp => "host_up",
            ScanStatus::HostDown => "host_down",
            ScanStatus::ImpliedHostUp => "implied_host_up",
            ScanStatus::Completed => "completed",
            ScanStatus::CompletedNoHosts => "completed_no_hosts",
            ScanStatus::Timeout => "timeout",
            ScanStatus::NoOutput => "no_output",
        }
    }

    /// Underscores to spaces, each word capitalised: `host_found` -> `Host Found`.
    pub fn title(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary numbers derived from the raw output.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStatistics {
    pub hosts_up: u32,
    pub open_ports: Vec<PortRecord>,
    /// Reserved in the report schema; never filled by the extractor.
    #[serde(default)]
    pub services: Vec<String>,
    pub scan_status: ScanStatus,
    #[serde(default)]
    pub vulnerabilities: Vec<String>,
    /// Last host named by a "scan report for" line. Not part of the report schema.
    #[serde(skip)]
    pub last_host: Option<String>,
}

impl ScanStatistics {
    /// Placeholder statistics for a scan that hit its timeout.
    pub fn timed_out() -> Self {
        Self {
            scan_status: ScanStatus::Timeout,
            ..Self::default()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScanMetadata {
    pub target: String,
    pub profile: String,
    /// RFC 3339.
    pub timestamp: String,
    pub command: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything known about one scan; this is the JSON report document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub metadata: ScanMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_errors: Option<String>,
    pub statistics: ScanStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&ScanStatus::CompletedNoHosts).unwrap();
        assert_eq!(json, "\"completed_no_hosts\"");
        let back: ScanStatus = serde_json::from_str("\"implied_host_up\"").unwrap();
        assert_eq!(back, ScanStatus::ImpliedHostUp);
    }

    #[test]
    fn status_title_case() {
        assert_eq!(ScanStatus::ImpliedHostUp.title(), "Implied Host Up");
        assert_eq!(ScanStatus::Timeout.title(), "Timeout");
        assert_eq!(ScanStatus::NoOutput.to_string(), "no_output");
    }

    #[test]
    fn absent_optional_fields_are_omitted() {
        let port = PortRecord {
            port: "22".into(),
            protocol: "tcp".into(),
            state: "open".into(),
            service: "ssh".into(),
            version: None,
        };
        let v = serde_json::to_value(&port).unwrap();
        assert!(v.get("version").is_none());
    }
}
