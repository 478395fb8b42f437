//! Aggregation of trace events into per-method statistics.
//!
//! This module turns parsed events into:
//! - Per-thread call stacks (entry/exit matching)
//! - Completed call intervals
//! - Count and total duration per method

pub mod metrics;
pub mod pipeline;
pub mod stack_builder;

// Re-export main types and functions
pub use metrics::{MethodStats, MethodTable};
pub use pipeline::{analyze_reader, Analysis, RunSummary, TraceAnalyzer};
pub use stack_builder::{CallFrame, CompletedCall, OrphanPolicy, StackOutcome, ThreadStacks};
