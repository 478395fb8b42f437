//! xtrace-stats CLI
//!
//! Computes per-method call counts and average durations from
//! Xtrace `iprint=mt` method trace output.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use xtrace_stats::aggregator::OrphanPolicy;
use xtrace_stats::commands::{execute_analyze, validate_args, AnalyzeArgs};
use xtrace_stats::output::SortKey;

/// Compute per-method counts and average durations from Xtrace iprint logs
#[derive(Parser, Debug)]
#[command(name = "xtrace-stats")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to native_stderr.log (or any file with Xtrace lines)
    logfile: PathBuf,

    /// Show only the top N methods after sorting (0 = all)
    #[arg(long, default_value = "0")]
    top: usize,

    /// Sort key
    #[arg(long, value_enum, default_value = "avg")]
    sort: SortKey,

    /// Method name column width (long names are center-ellipsized, minimum 10)
    #[arg(long, default_value = "60")]
    width: usize,

    /// Also write a JSON report to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// What to do with open calls skipped over by a mismatched exit
    #[arg(long, value_enum, default_value = "discard")]
    orphans: OrphanPolicy,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = AnalyzeArgs {
        logfile: cli.logfile,
        top: cli.top,
        sort: cli.sort,
        width: cli.width,
        output_json: cli.json,
        orphan_policy: cli.orphans,
    };

    // Validate args first
    validate_args(&args)?;

    execute_analyze(args)?;

    Ok(())
}
