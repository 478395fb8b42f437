//! Report rendering and export.
//!
//! This module handles:
//! - Sorting and truncating per-method rows
//! - Fixed-width console tables
//! - JSON reports

pub mod json;
pub mod schema;
pub mod table;

// Re-export main functions
pub use json::{build_report, read_report, write_report};
pub use schema::{Report, ReportRow};
pub use table::{build_rows, ellipsize_middle, render_table, sort_rows, take_top, SortKey};
