use std::io::ErrorKind;
use std::process::Stdio;

use tokio::time;
use tracing::{debug, warn};

use crate::config::ScannerConfig;
use crate::error::{Result, ScanError};
use crate::scanner::shell;

/// Outcome of asking the scanning tool for its version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCheck {
    /// First line of `--version` output, e.g. `Nmap version 7.94 ( https://nmap.org )`.
    Found { version_line: String },
    /// The tool did not answer in time. Scanning may still proceed.
    TimedOut,
}

impl ToolCheck {
    /// Third whitespace token of the version line, if any.
    pub fn version(&self) -> Option<&str> {
        match self {
            ToolCheck::Found { version_line } => version_line.split_whitespace().nth(2),
            ToolCheck::TimedOut => None,
        }
    }
}

/// Run `<tool> --version` through the shell under the configured timeout.
///
/// The tool string is interpreted the same way as for scans, so values such
/// as `sudo nmap` work. A tool that cannot be started, or that exits non-zero
/// (the shell reports 127 for an unknown command), is reported as
/// [`ScanError::ToolMissing`]. A timeout is not an error.
pub async fn check_tool(config: &ScannerConfig) -> Result<ToolCheck> {
    let missing = || ScanError::ToolMissing {
        tool: config.tool.clone(),
    };

    let mut cmd = shell(&format!("{} --version", config.tool));
    cmd.stdin(Stdio::null()).kill_on_drop(true);

    let output = match time::timeout(config.version_check_timeout, cmd.output()).await {
        Err(_) => {
            warn!(tool = %config.tool, "version check timed out");
            return Ok(ToolCheck::TimedOut);
        }
        Ok(Err(e)) if e.kind() == ErrorKind::NotFound => return Err(missing()),
        Ok(Err(e)) => {
            debug!(tool = %config.tool, error = %e, "version check could not start");
            return Err(missing());
        }
        Ok(Ok(output)) => output,
    };

    if !output.status.success() {
        debug!(tool = %config.tool, status = %output.status, "version check failed");
        return Err(missing());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version_line = stdout
        .split('\n')
        .next()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .unwrap_or("Nmap")
        .to_string();
    Ok(ToolCheck::Found { version_line })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_token() {
        let check = ToolCheck::Found {
            version_line: "Nmap version 7.94 ( https://nmap.org )".into(),
        };
        assert_eq!(check.version(), Some("7.94"));

        let short = ToolCheck::Found {
            version_line: "Nmap".into(),
        };
        assert_eq!(short.version(), None);
        assert_eq!(ToolCheck::TimedOut.version(), None);
    }

    #[tokio::test]
    async fn nonexistent_tool_is_missing() {
        let config = ScannerConfig {
            tool: "/nonexistent/definitely-not-nmap".into(),
            ..ScannerConfig::default()
        };
        match check_tool(&config).await {
            Err(ScanError::ToolMissing { tool }) => assert!(tool.contains("definitely-not-nmap")),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
