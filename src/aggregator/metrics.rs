//! Per-method call statistics.
//!
//! Every completed call adds one to its method's count and its duration to
//! the method's total. Nothing decays; the table lives as long as the run.

use super::stack_builder::CompletedCall;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Accumulated statistics for one method signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodStats {
    /// Method signature
    pub method: String,

    /// Number of completed calls
    pub count: u64,

    /// Sum of completed call durations
    pub total_duration_ms: u64,
}

impl MethodStats {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            count: 0,
            total_duration_ms: 0,
        }
    }

    /// Add one completed call
    pub fn record(&mut self, duration_ms: u64) {
        self.count += 1;
        self.total_duration_ms += duration_ms;
    }

    /// Mean duration, 0.0 when nothing was recorded
    pub fn average_ms(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_duration_ms as f64 / self.count as f64
        }
    }
}

/// Statistics for all methods, keyed by signature across all threads
#[derive(Debug, Clone, Default)]
pub struct MethodTable {
    stats: HashMap<String, MethodStats>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a method's stats, creating zeroed stats on first use
    pub fn entry_mut(&mut self, method: &str) -> &mut MethodStats {
        self.stats
            .entry(method.to_string())
            .or_insert_with(|| MethodStats::new(method))
    }

    /// Fold one completed call into the table
    ///
    /// **Public** - main entry point for aggregation
    pub fn record(&mut self, call: &CompletedCall) {
        self.entry_mut(&call.method).record(call.duration_ms);
    }

    pub fn get(&self, method: &str) -> Option<&MethodStats> {
        self.stats.get(method)
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Number of completed calls across all methods
    pub fn total_calls(&self) -> u64 {
        self.stats.values().map(|s| s.count).sum()
    }

    /// Sum of all recorded durations
    pub fn total_duration_ms(&self) -> u64 {
        self.stats.values().map(|s| s.total_duration_ms).sum()
    }

    /// Iterate in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &MethodStats> {
        self.stats.values()
    }
}
