//! spec-reporter - Human-readable reporting for BDD test runs
//!
//! CLI entry point: replays a recorded event log through the default reporter.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use spec_reporter::config::{ReporterConfig, ReporterFlags};
use spec_reporter::events::{replay, EventLog};
use spec_reporter::reporter::DefaultReporter;

/// Render a recorded test run
///
/// Reads suite lifecycle events from a JSON Lines file and prints them the way
/// the default reporter would have printed them live.
#[derive(Parser, Debug)]
#[command(name = "spec-reporter", version, about)]
struct Cli {
    /// Path to the JSONL event log
    events: PathBuf,

    /// Path to a reporter.toml configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Succinct output: one glyph per spec
    #[arg(long)]
    succinct: bool,

    /// Verbose output: announce every spec
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Very verbose output: also detail pending and skipped specs
    #[arg(long)]
    very_verbose: bool,

    /// Disable colors
    #[arg(long)]
    no_color: bool,

    /// Emit captured writer output for passing specs too
    #[arg(long)]
    always_emit_writer_output: bool,

    /// Print full stack traces for failures
    #[arg(long)]
    full_trace: bool,

    /// Flag specs slower than this many seconds
    #[arg(long)]
    slow_spec_threshold: Option<f64>,

    /// Log debug diagnostics to stderr
    #[arg(long)]
    debug: bool,
}

/// Merge the config file (if any) with command-line flags.
///
/// Boolean flags set on the command line are added to the file's; the
/// combination is validated as a whole.
fn resolve_config(cli: &Cli) -> Result<ReporterConfig> {
    let mut flags = match &cli.config {
        Some(path) => ReporterFlags::from_path(path)?,
        None => ReporterFlags::default(),
    };

    flags.succinct |= cli.succinct;
    flags.verbose |= cli.verbose;
    flags.very_verbose |= cli.very_verbose;
    flags.no_color |= cli.no_color;
    flags.always_emit_writer_output |= cli.always_emit_writer_output;
    flags.full_trace |= cli.full_trace;
    if let Some(threshold) = cli.slow_spec_threshold {
        flags.slow_spec_threshold = threshold;
    }

    flags.into_config()
}

fn init_tracing(debug: bool) {
    let filter = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = resolve_config(&cli)?;
    if !config.color {
        colored::control::set_override(false);
    }

    let log = EventLog::new(&cli.events);
    let events = log
        .read_all()
        .with_context(|| format!("Failed to load events from {}", cli.events.display()))?;
    tracing::debug!(count = events.len(), path = %log.path().display(), "loaded events");

    let stdout = io::stdout();
    let mut reporter = DefaultReporter::new(config, stdout.lock());
    let succeeded = replay(&events, &mut reporter);
    drop(reporter.into_inner());

    Ok(match succeeded {
        Some(false) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}
