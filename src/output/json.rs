//! JSON report output writer.
//!
//! Writes `Report` structs to JSON files with proper formatting.

use super::schema::{Report, ReportRow};
use super::table::SortKey;
use crate::aggregator::RunSummary;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Assemble a report from final rows
///
/// **Public** - the rows should already be sorted and truncated
pub fn build_report(
    source: &Path,
    sort: SortKey,
    summary: &RunSummary,
    rows: &[ReportRow],
) -> Report {
    Report {
        version: SCHEMA_VERSION.to_string(),
        source: source.display().to_string(),
        sort: sort.to_string(),
        summary: summary.clone(),
        methods: rows.to_vec(),
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `report` - Report data to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &Report, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    debug!("Report written with {} methods", report.methods.len());

    Ok(())
}

/// Read a report back from JSON
///
/// **Public** - for tooling and tests
pub fn read_report(input_path: impl AsRef<Path>) -> Result<Report, OutputError> {
    let input_path = input_path.as_ref();

    let file = File::open(input_path).map_err(OutputError::ReadFailed)?;
    let report = serde_json::from_reader(BufReader::new(file))?;

    Ok(report)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_output_path() {
        let dir = tempdir().unwrap();
        assert!(validate_output_path(Path::new("")).is_err());
        assert!(validate_output_path(dir.path()).is_err());
        assert!(validate_output_path(&dir.path().join("report.json")).is_ok());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/report.json");
        let report = build_report(Path::new("trace.log"), SortKey::Avg, &RunSummary::default(), &[]);

        write_report(&report, &path).unwrap();
        assert!(path.exists());
    }
}
