use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::Parser;
use tracing::{debug, info};

use netsec_scan::config::{ScannerConfig, DEFAULT_OUTPUT_DIR, DEFAULT_TOOL};
use netsec_scan::environment::{self, ToolCheck};
use netsec_scan::error::ScanError;
use netsec_scan::profiles::{self, DEFAULT_PROFILE};
use netsec_scan::stats::ExtractionMode;
use netsec_scan::{console, logging, render, scanner};

const EPILOG: &str = "\
Examples:
  netsec-scan 192.168.1.0/24                  # Discover hosts
  netsec-scan 192.168.1.1 --profile quick     # Quick port scan
  netsec-scan example.com --profile comprehensive
  netsec-scan --from-json reports/            # Rebuild HTML from JSON reports

Scan Profiles:
  discovery      - Find active hosts only
  quick          - Fast TCP port scan
  comprehensive  - Full scan with OS/version detection
  vulnerability  - Vulnerability assessment
  udp            - Top UDP ports scan";

/// netsec-scan — run an nmap profile against a target and write text, JSON, Markdown and HTML reports.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "netsec-scan",
    version,
    about = "Run an nmap scan profile against a target and write text, JSON, Markdown and HTML reports.",
    long_about = None,
    after_help = EPILOG
)]
struct Cli {
    /// Target IP, range, or domain. Passed to nmap unmodified.
    #[arg(required_unless_present_any = ["from_json", "list_profiles"])]
    target: Option<String>,

    /// Scan profile to use.
    #[arg(
        short,
        long,
        default_value = DEFAULT_PROFILE,
        value_parser = PossibleValuesParser::new(profiles::names())
    )]
    profile: String,

    /// Output directory for reports.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// nmap command, run through the shell for both the version check and the scan (e.g. "sudo nmap").
    #[arg(long = "nmap", default_value = DEFAULT_TOOL)]
    nmap: String,

    /// Host-status rule ordering used when reading nmap output.
    #[arg(long, value_enum, default_value_t = ExtractionMode::Corrected)]
    extraction: ExtractionMode,

    /// Rebuild HTML reports from a JSON report file or a directory of them, then exit.
    #[arg(long = "from-json", conflicts_with = "target")]
    from_json: Option<PathBuf>,

    /// Print the scan profiles and exit.
    #[arg(long = "list-profiles")]
    list_profiles: bool,

    /// Verbose diagnostics on stderr (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    debug!(?cli, "parsed arguments");

    if cli.list_profiles {
        print!("{}", console::render_profiles());
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(path) = cli.from_json.as_deref() {
        let written = render::render_path(path)
            .with_context(|| format!("failed to render reports from {}", path.display()))?;
        for out in &written {
            println!("HTML report written: {}", out.display());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let Some(target) = cli.target.as_deref() else {
        // clap enforces a target when neither early-exit flag is present.
        return Ok(ExitCode::FAILURE);
    };

    let config = ScannerConfig {
        tool: cli.nmap.clone(),
        output_dir: cli.output.clone(),
        extraction: cli.extraction,
        ..ScannerConfig::default()
    };

    println!("\n============================================================");
    println!("NETWORK SECURITY SCANNER");
    println!("============================================================");

    match environment::check_tool(&config).await {
        Ok(ToolCheck::Found { version_line }) => println!("{version_line}"),
        Ok(ToolCheck::TimedOut) => println!("Warning: {} version check timed out", config.tool),
        Err(e @ ScanError::ToolMissing { .. }) => {
            eprintln!("Error: {e}");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e).context("version check failed"),
    }

    let outcome = scanner::run_scan(&config, target, &cli.profile)
        .await
        .context("scan could not start")?;
    info!(completed = outcome.is_some(), "done");
    Ok(ExitCode::SUCCESS)
}
