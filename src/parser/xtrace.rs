//! Line parser for Xtrace `iprint=mt` method trace output.
//!
//! Lines look like:
//!
//! ```text
//! 21:00:05.736 0x2a7b500   mt.3  > com/ibm/ws/util/BoundedBuffer$GetQueueLock.lock()V compiled method, this = 0x70b3568f0
//! 21:00:05.736 0x2a7b500   mt.9  < com/ibm/ws/util/BoundedBuffer$GetQueueLock.lock()V compiled method
//! ```
//!
//! Anything that does not fit this shape (blank lines, JVM banners, other
//! tracepoints) is noise and yields `None`.

use super::schema::{Direction, TimeOfDay, TraceEvent};
use log::trace;
use regex::Regex;
use std::sync::LazyLock;

/// Timestamp, thread token, lazily matched slack columns, direction marker
/// and a whitespace-free method signature.
static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<ts>[0-9]{2}[:.][0-9]{2}[:.][0-9]{2}[:.][0-9]{3})\s+(?P<tid>0x[0-9a-fA-F]+)\s+.*?(?P<arrow>[<>])\s+(?P<method>\S+)",
    )
    .expect("trace line pattern is valid")
});

/// Parse one raw input line into a trace event
///
/// **Public** - main entry point for line parsing
///
/// # Arguments
/// * `line_number` - 1-based position of the line in the input
/// * `line` - Line text without its trailing newline
///
/// # Returns
/// `Some(event)` when the whole grammar matches, `None` otherwise.
/// A non-matching line is not an error.
pub fn parse_line(line_number: usize, line: &str) -> Option<TraceEvent> {
    if line.trim().is_empty() {
        return None;
    }

    let Some(caps) = LINE_RE.captures(line) else {
        trace!("line {}: not a method trace line", line_number);
        return None;
    };

    let timestamp = parse_time_of_day(&caps["ts"])?;
    let direction = caps["arrow"].chars().next().and_then(Direction::from_marker)?;

    Some(TraceEvent {
        line_number,
        timestamp,
        thread_id: caps["tid"].to_string(),
        direction,
        method: caps["method"].to_string(),
    })
}

/// Parse `HH[:|.]MM[:|.]SS[:|.]mmm` into a time of day
///
/// **Public** - also used directly by tests and the clock
///
/// Separators may be mixed freely. Returns `None` when the text does not
/// have exactly four numeric fields.
pub fn parse_time_of_day(text: &str) -> Option<TimeOfDay> {
    let mut fields = text.split([':', '.']).map(|f| f.parse::<u64>().ok());

    let hours = fields.next()??;
    let minutes = fields.next()??;
    let seconds = fields.next()??;
    let millis = fields.next()??;

    if fields.next().is_some() {
        return None;
    }

    Some(TimeOfDay::new(hours, minutes, seconds, millis))
}
