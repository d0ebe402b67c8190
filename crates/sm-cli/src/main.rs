//! CLI entry point for the smartui-migrate detection tool.
//!
//! This binary identifies which visual-testing platform, test framework,
//! and language a project uses, as the first step of a migration to
//! SmartUI.
//!
//! # Usage
//!
//! ```bash
//! smartui-detect [OPTIONS] <COMMAND>
//!
//! # Detect and show a summary
//! smartui-detect detect --path /path/to/project
//!
//! # Detect with the full categorized file lists
//! smartui-detect detect --detailed
//!
//! # Generate a machine-readable report
//! smartui-detect report --format json --output detection.json
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use sm_core::{Config, DetectionResult};
use sm_detector::{DetectError, Detector, DetectorConfig, StatsSnapshot};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Detects the visual-testing platform, framework, and language of a
/// project ahead of a SmartUI migration.
#[derive(Parser)]
#[command(name = "smartui-detect", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Path to the project root to scan.
    ///
    /// Defaults to the current directory if not specified.
    #[arg(short, long, global = true, env = "SMARTUI_DETECT_PATH")]
    path: Option<Utf8PathBuf>,

    /// Path to a JSON configuration file.
    #[arg(short, long, global = true, env = "SMARTUI_DETECT_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Scan the project and display a detection summary.
    Detect {
        /// Show the categorized file lists.
        #[arg(short, long)]
        detailed: bool,
    },

    /// Generate a detection report.
    Report {
        /// Output format.
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Json)]
        format: ReportFormat,

        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },
}

/// Report output format.
#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// JSON format.
    Json,
    /// CSV format.
    Csv,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},ignore=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_ansi(use_ansi))
        .with(filter)
        .init();
}

/// Builds a [`Config`] from CLI arguments.
///
/// A configuration file (when given) supplies the base values; `--path`
/// overrides its scan root.
///
/// # Errors
///
/// Returns an error if the configuration file is invalid or the resolved
/// path doesn't exist or isn't a directory.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(config_path) => Config::load(config_path)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load {}: {}", config_path, e))?,
        None => Config::default(),
    };

    if let Some(path) = &cli.path {
        config.scan.root_path = path.clone();
    }
    if config.scan.root_path.as_str().is_empty() {
        config.scan.root_path = Utf8PathBuf::from(".");
    }

    let path = &config.scan.root_path;
    if !path.exists() {
        return Err(color_eyre::eyre::eyre!("Path does not exist: {}", path));
    }
    if !path.is_dir() {
        return Err(color_eyre::eyre::eyre!("Path is not a directory: {}", path));
    }

    Ok(config)
}

/// Creates a [`Detector`] from the configuration.
///
/// # Errors
///
/// Returns an error if the detector cannot be created.
fn create_detector(config: &Config) -> color_eyre::Result<Detector> {
    let skip_dirs: Vec<&str> = config.scan.skip_dirs.iter().map(String::as_str).collect();
    let detector_config = DetectorConfig::new(&config.scan.root_path)
        .with_skip_dirs(&skip_dirs)
        .with_source_extensions(&config.scan.source_extensions)
        .with_follow_links(config.scan.follow_links);

    Detector::new(detector_config)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create detector: {}", e))
}

/// Runs a detection scan on a blocking worker thread.
///
/// The two deliberate detection refusals are turned into plain messages
/// without a backtrace; everything else surfaces as a report.
async fn run_detection(detector: Detector) -> color_eyre::Result<DetectionResult> {
    let outcome = tokio::task::spawn_blocking(move || detector.detect()).await?;

    outcome.map_err(|e| match e {
        DetectError::PlatformNotDetected | DetectError::MultiplePlatforms { .. } => {
            color_eyre::eyre::eyre!("{e}")
        }
        other => color_eyre::eyre::eyre!("Detection failed: {}", other),
    })
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Runs a one-shot detection with summary output.
///
/// # Errors
///
/// Returns an error if detection fails.
async fn run_detect(config: &Config, detailed: bool) -> color_eyre::Result<()> {
    info!(root = %config.scan.root_path, "Starting detection");

    let detector = create_detector(config)?;
    let result = run_detection(detector.clone()).await?;

    print_summary(&result, &detector.stats())?;

    if detailed {
        print_file_lists(&result)?;
    }

    Ok(())
}

/// Generates a detection report in the specified format.
///
/// # Errors
///
/// Returns an error if detection or writing fails.
async fn run_report(
    config: &Config,
    format: ReportFormat,
    output: Option<Utf8PathBuf>,
) -> color_eyre::Result<()> {
    info!(root = %config.scan.root_path, "Generating report");

    let detector = create_detector(config)?;
    let result = run_detection(detector.clone()).await?;

    let content = match format {
        ReportFormat::Json => generate_json_report(&result, &detector.stats())?,
        ReportFormat::Csv => generate_csv_report(&result),
    };

    if let Some(output_path) = output {
        std::fs::write(output_path.as_std_path(), &content)?;
        info!(path = %output_path, "Report written");
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        write!(handle, "{content}")?;
    }

    Ok(())
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Prints the detection summary.
fn print_summary(result: &DetectionResult, stats: &StatsSnapshot) -> color_eyre::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle)?;
    writeln!(handle, "Detection Summary")?;
    writeln!(handle, "=================")?;
    writeln!(handle)?;
    writeln!(handle, "Platform:   {}", result.platform)?;
    writeln!(handle, "Framework:  {}", result.framework)?;
    writeln!(handle, "Language:   {}", result.language)?;
    writeln!(handle, "Test type:  {}", result.test_type)?;
    writeln!(handle)?;
    writeln!(handle, "Files found: {}", result.files.total())?;
    writeln!(handle, "  Config:          {}", result.files.config.len())?;
    writeln!(handle, "  Source:          {}", result.files.source.len())?;
    writeln!(handle, "  CI:              {}", result.files.ci.len())?;
    writeln!(
        handle,
        "  Package manager: {}",
        result.files.package_manager.len()
    )?;
    writeln!(handle)?;
    writeln!(
        handle,
        "Scanned {} source files, {} matched ({:.1}%), {} read errors",
        stats.scanned,
        stats.matched,
        stats.match_rate(),
        stats.read_errors
    )?;

    Ok(())
}

/// Prints the categorized file lists.
fn print_file_lists(result: &DetectionResult) -> color_eyre::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let buckets = [
        ("Config files", &result.files.config),
        ("Source files", &result.files.source),
        ("CI files", &result.files.ci),
        ("Package manifests", &result.files.package_manager),
    ];

    for (label, files) in buckets {
        if files.is_empty() {
            continue;
        }
        writeln!(handle)?;
        writeln!(handle, "{} ({}):", label, files.len())?;
        for file in files {
            writeln!(handle, "  {file}")?;
        }
    }

    Ok(())
}

/// Generates a JSON report.
fn generate_json_report(
    result: &DetectionResult,
    stats: &StatsSnapshot,
) -> color_eyre::Result<String> {
    #[derive(serde::Serialize)]
    struct Report<'a> {
        detection: &'a DetectionResult,
        stats: &'a StatsSnapshot,
    }

    let report = Report {
        detection: result,
        stats,
    };
    serde_json::to_string_pretty(&report)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to serialize JSON: {}", e))
}

/// Generates a CSV report: one row per detected file with its category.
fn generate_csv_report(result: &DetectionResult) -> String {
    use std::fmt::Write;

    let mut output = String::from("path,category\n");

    let buckets = [
        ("config", &result.files.config),
        ("source", &result.files.source),
        ("ci", &result.files.ci),
        ("package_manager", &result.files.package_manager),
    ];

    for (category, files) in buckets {
        for file in files {
            let escaped_path = escape_csv(file.as_str());
            let _ = writeln!(output, "{escaped_path},{category}");
        }
    }

    output
}

/// Escapes a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_owned()
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Route to appropriate command
    let config = build_config(&cli)?;
    match &cli.command {
        Commands::Detect { detailed } => run_detect(&config, *detailed).await,
        Commands::Report { format, output } => {
            run_report(&config, *format, output.clone()).await
        }
    }
}
