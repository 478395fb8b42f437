//! Single-pass analysis driver.
//!
//! Each line goes through parse -> clock -> stacks -> table before the next
//! one is read. Anomalies along the way only bump counters in `RunSummary`.

use super::metrics::MethodTable;
use super::stack_builder::{OrphanPolicy, StackOutcome, ThreadStacks};
use crate::parser::{normalize_time, parse_line, ClockState};
use crate::utils::error::AnalyzeError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::io::BufRead;

/// Counters describing one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Lines read from the input
    pub lines_read: usize,

    /// Lines that matched the trace grammar
    pub events_parsed: usize,

    /// Entry events pushed on a stack
    pub entries: usize,

    /// Exits matched to an open entry and recorded
    pub completed_calls: usize,

    /// Exits with no matching open entry on their thread
    pub unmatched_exits: usize,

    /// Frames dropped because an outer frame's exit closed over them
    pub orphaned_frames: usize,

    /// Matched exits discarded because they precede their entry
    pub negative_durations: usize,

    /// Frames still open when the input ended
    pub unterminated_frames: usize,

    /// Distinct thread ids that pushed at least one frame
    pub threads: usize,

    /// Midnight rollovers detected by the clock
    pub rollovers: u64,
}

impl RunSummary {
    /// Lines that did not match the grammar (including blank lines)
    pub fn lines_skipped(&self) -> usize {
        self.lines_read - self.events_parsed
    }
}

/// Final state of a run
#[derive(Debug, Clone)]
pub struct Analysis {
    pub table: MethodTable,
    pub summary: RunSummary,
}

/// Streaming analyzer holding all per-run state
#[derive(Debug)]
pub struct TraceAnalyzer {
    clock: ClockState,
    stacks: ThreadStacks,
    table: MethodTable,
    summary: RunSummary,
}

impl Default for TraceAnalyzer {
    fn default() -> Self {
        Self::new(OrphanPolicy::default())
    }
}

impl TraceAnalyzer {
    pub fn new(policy: OrphanPolicy) -> Self {
        Self {
            clock: ClockState::new(),
            stacks: ThreadStacks::new(policy),
            table: MethodTable::new(),
            summary: RunSummary::default(),
        }
    }

    /// Process one input line
    ///
    /// **Public** - feed lines in input order
    pub fn feed_line(&mut self, line: &str) {
        self.summary.lines_read += 1;

        let Some(event) = parse_line(self.summary.lines_read, line) else {
            return;
        };
        self.summary.events_parsed += 1;

        let (at, clock) = normalize_time(self.clock, &event.timestamp);
        self.clock = clock;

        match self.stacks.apply(&event, at) {
            StackOutcome::Entered => self.summary.entries += 1,
            StackOutcome::Completed { call, orphaned } => {
                self.table.record(&call);
                self.summary.completed_calls += 1;
                self.summary.orphaned_frames += orphaned;
            }
            StackOutcome::UnmatchedExit => self.summary.unmatched_exits += 1,
            StackOutcome::NegativeDuration { orphaned, .. } => {
                self.summary.negative_durations += 1;
                self.summary.orphaned_frames += orphaned;
            }
        }
    }

    /// Current statistics, before the run is finished
    pub fn table(&self) -> &MethodTable {
        &self.table
    }

    /// End the run. Frames still open are dropped.
    pub fn finish(mut self) -> Analysis {
        self.summary.unterminated_frames = self.stacks.open_frames();
        self.summary.threads = self.stacks.thread_count();
        self.summary.rollovers = self.clock.rollovers();

        if self.summary.unterminated_frames > 0 {
            debug!(
                "Dropping {} frame(s) still open at end of input",
                self.summary.unterminated_frames
            );
        }

        Analysis {
            table: self.table,
            summary: self.summary,
        }
    }
}

/// Run the analyzer over a whole input stream
///
/// **Public** - main entry point for analysis
///
/// # Arguments
/// * `reader` - Buffered trace input
/// * `policy` - Treatment of frames skipped over by a mismatched exit
///
/// # Returns
/// Method statistics and run counters
///
/// # Errors
/// * `AnalyzeError::ReadFailed` - I/O error while reading; the run is aborted
///
/// Bytes that are not valid UTF-8 are replaced, never rejected.
pub fn analyze_reader<R: BufRead>(
    mut reader: R,
    policy: OrphanPolicy,
) -> Result<Analysis, AnalyzeError> {
    let mut analyzer = TraceAnalyzer::new(policy);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(trim_line_ending(&buf));
        if let Cow::Owned(_) = line {
            debug!(
                "line {}: replaced invalid UTF-8",
                analyzer.summary.lines_read + 1
            );
        }
        analyzer.feed_line(&line);
    }

    let analysis = analyzer.finish();
    info!(
        "Read {} lines: {} trace events, {} completed calls across {} methods",
        analysis.summary.lines_read,
        analysis.summary.events_parsed,
        analysis.summary.completed_calls,
        analysis.table.len()
    );
    debug!("Run summary: {:?}", analysis.summary);

    Ok(analysis)
}

/// Strip a trailing `\n` or `\r\n`
fn trim_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
