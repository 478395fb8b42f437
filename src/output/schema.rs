//! Report schema definitions.
//!
//! `ReportRow` is what the table prints; `Report` is what the JSON export
//! writes. Schema is versioned to allow future evolution.

use crate::aggregator::{MethodStats, RunSummary};
use serde::{Deserialize, Serialize};

/// One output row per method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub method: String,
    pub count: u64,
    pub total_ms: u64,
    pub avg_ms: f64,
}

impl From<&MethodStats> for ReportRow {
    fn from(stats: &MethodStats) -> Self {
        Self {
            method: stats.method.clone(),
            count: stats.count,
            total_ms: stats.total_duration_ms,
            avg_ms: stats.average_ms(),
        }
    }
}

/// Top-level structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for compatibility checking
    pub version: String,

    /// Path of the analyzed log
    pub source: String,

    /// Ordering applied to `methods`
    pub sort: String,

    /// Run counters
    pub summary: RunSummary,

    /// Rows after sorting and truncation
    pub methods: Vec<ReportRow>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}
