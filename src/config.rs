use std::path::PathBuf;
use std::time::Duration;

use crate::profiles::VULNERABILITY_PROFILE;
use crate::stats::ExtractionMode;

pub const DEFAULT_TOOL: &str = "nmap";
pub const DEFAULT_OUTPUT_DIR: &str = "reports";

/// Runtime settings for one scanner invocation.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Scanning binary, resolved through `PATH` by the shell.
    pub tool: String,
    pub output_dir: PathBuf,
    pub version_check_timeout: Duration,
    pub scan_timeout: Duration,
    pub vulnerability_timeout: Duration,
    pub extraction: ExtractionMode,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            version_check_timeout: Duration::from_secs(10),
            scan_timeout: Duration::from_secs(600),
            vulnerability_timeout: Duration::from_secs(900),
            extraction: ExtractionMode::default(),
        }
    }
}

impl ScannerConfig {
    /// Subprocess timeout for the given profile name.
    pub fn timeout_for(&self, profile: &str) -> Duration {
        if profile == VULNERABILITY_PROFILE {
            self.vulnerability_timeout
        } else {
            self.scan_timeout
        }
    }
}
