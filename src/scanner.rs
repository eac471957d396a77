use std::process::Stdio;
use std::time::Duration;

use ::time::{format_description::well_known, OffsetDateTime};
use tokio::process::Command;
use tokio::time;
use tracing::{error, info, warn};

use crate::config::ScannerConfig;
use crate::console;
use crate::error::{Result, ScanError};
use crate::profiles::{self, ScanProfile};
use crate::report;
use crate::stats::extract_statistics_with;
use crate::types::{ScanMetadata, ScanResult, ScanStatistics};

/// How the scan subprocess ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Execution {
    Completed {
        return_code: i32,
        stdout: String,
        stderr: String,
    },
    TimedOut,
}

/// Command line handed to the shell: `<tool> <flags> <target>`.
///
/// The target is inserted verbatim and is trusted input.
pub fn build_command(tool: &str, profile: &ScanProfile, target: &str) -> String {
    format!("{tool} {} {target}", profile.flags)
}

/// Run `command` through the platform shell, killing it once `timeout` elapses.
pub async fn execute(command: &str, timeout: Duration) -> Result<Execution> {
    let mut cmd = shell(command);
    cmd.stdin(Stdio::null()).kill_on_drop(true);

    match time::timeout(timeout, cmd.output()).await {
        Err(_) => Ok(Execution::TimedOut),
        Ok(Err(source)) => Err(ScanError::Spawn {
            command: command.to_string(),
            source,
        }),
        Ok(Ok(output)) => Ok(Execution::Completed {
            // Killed by a signal: no exit code.
            return_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }),
    }
}

#[cfg(windows)]
pub(crate) fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(not(windows))]
pub(crate) fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

/// Scan `target` with the named profile, write the four reports and print a summary.
///
/// An unknown profile is returned as an error before anything is spawned.
/// Timeouts still produce a (partial) result and reports. Any other failure is
/// logged and yields `Ok(None)`.
pub async fn run_scan(
    config: &ScannerConfig,
    target: &str,
    profile_name: &str,
) -> Result<Option<ScanResult>> {
    let profile = profiles::find(profile_name)?;
    let command = build_command(&config.tool, profile, target);
    console::print_scan_banner(target, profile, &command);

    match scan_and_report(config, target, profile, &command).await {
        Ok(result) => Ok(Some(result)),
        Err(e) => {
            error!(%target, profile = profile.name, error = %e, "scan failed");
            eprintln!("\nUnexpected error: {e}");
            Ok(None)
        }
    }
}

async fn scan_and_report(
    config: &ScannerConfig,
    target: &str,
    profile: &ScanProfile,
    command: &str,
) -> Result<ScanResult> {
    let timeout = config.timeout_for(profile.name);
    info!(%command, timeout_s = timeout.as_secs(), "starting scan");

    let execution = execute(command, timeout).await?;
    let timed_out = execution == Execution::TimedOut;

    let metadata = ScanMetadata {
        target: target.to_string(),
        profile: profile.name.to_string(),
        timestamp: now_iso_like(),
        command: command.to_string(),
        success: false,
        return_code: None,
        error: None,
    };

    let result = match execution {
        Execution::Completed {
            return_code,
            stdout,
            stderr,
        } => {
            info!(return_code, stdout_bytes = stdout.len(), "scan finished");
            let statistics = extract_statistics_with(&stdout, config.extraction);
            ScanResult {
                metadata: ScanMetadata {
                    success: return_code == 0,
                    return_code: Some(return_code),
                    ..metadata
                },
                raw_output: Some(stdout),
                raw_errors: Some(stderr),
                statistics,
            }
        }
        Execution::TimedOut => {
            warn!(timeout_s = timeout.as_secs(), "scan timed out");
            console::print_timeout(timeout);
            ScanResult {
                metadata: ScanMetadata {
                    error: Some("Timeout".to_string()),
                    ..metadata
                },
                raw_output: None,
                raw_errors: None,
                statistics: ScanStatistics::timed_out(),
            }
        }
    };

    let paths = report::write_reports(&result, &config.output_dir)?;
    console::print_report_paths(&paths);
    if !timed_out {
        console::print_summary(&result);
    }
    Ok(result)
}

fn now_iso_like() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(&well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}
