//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Reads the trace log line by line
//! 2. Rebuilds call stacks and aggregates per-method statistics
//! 3. Sorts and truncates the rows
//! 4. Prints the table and optionally writes a JSON report

use crate::aggregator::{analyze_reader, OrphanPolicy, RunSummary};
use crate::output::{build_report, build_rows, render_table, sort_rows, take_top, write_report};
use crate::output::{ReportRow, SortKey};
use crate::utils::config::DEFAULT_METHOD_WIDTH;
use anyhow::{Context, Result};
use log::{debug, info};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Trace log to read
    pub logfile: PathBuf,

    /// Number of rows to keep after sorting (0 = all)
    pub top: usize,

    /// Row ordering
    pub sort: SortKey,

    /// Method column width
    pub width: usize,

    /// Output path for a JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Treatment of frames skipped by a mismatched exit
    pub orphan_policy: OrphanPolicy,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            logfile: PathBuf::new(),
            top: 0,
            sort: SortKey::Avg,
            width: DEFAULT_METHOD_WIDTH,
            output_json: None,
            orphan_policy: OrphanPolicy::Discard,
        }
    }
}

/// Rows and counters produced by one analysis
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub rows: Vec<ReportRow>,
    pub summary: RunSummary,
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.logfile.as_os_str().is_empty() {
        anyhow::bail!("Log file path cannot be empty");
    }

    if args.logfile.is_dir() {
        anyhow::bail!("Log file path is a directory: {}", args.logfile.display());
    }

    if let Some(path) = &args.output_json {
        if path.as_os_str().is_empty() {
            anyhow::bail!("JSON output path cannot be empty");
        }
    }

    Ok(())
}

/// Analyze a log and return the final rows
///
/// **Public** - everything except printing
///
/// # Errors
/// * Missing or unreadable log file
/// * Read failure partway through the file
pub fn run_analysis(args: &AnalyzeArgs) -> Result<AnalysisResult> {
    let file = File::open(&args.logfile)
        .with_context(|| format!("Failed to open log file {}", args.logfile.display()))?;

    let analysis = analyze_reader(BufReader::new(file), args.orphan_policy)
        .with_context(|| format!("Failed to read log file {}", args.logfile.display()))?;

    let mut rows = build_rows(&analysis.table);
    if args.sort != SortKey::Avg {
        sort_rows(&mut rows, args.sort);
    }
    take_top(&mut rows, args.top);

    debug!("Keeping {} of {} methods", rows.len(), analysis.table.len());

    Ok(AnalysisResult {
        rows,
        summary: analysis.summary,
    })
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// Nothing is printed if the log cannot be read.
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Analyzing trace log: {}", args.logfile.display());

    let result = run_analysis(&args)?;

    print!("{}", render_table(&result.rows, args.width));

    if let Some(json_path) = &args.output_json {
        write_json(&args.logfile, args.sort, &result, json_path)?;
        info!("✓ Report written to: {}", json_path.display());
    }

    info!(
        "Analysis completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn write_json(source: &Path, sort: SortKey, result: &AnalysisResult, path: &Path) -> Result<()> {
    let report = build_report(source, sort, &result.summary, &result.rows);
    write_report(&report, path).context("Failed to write JSON report")?;
    Ok(())
}
