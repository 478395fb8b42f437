//! Event types produced by the line parser.
//!
//! A `TraceEvent` is one matched Xtrace line. It is consumed by the call
//! stack reconstructor and discarded right after.

use crate::utils::config::{ENTRY_MARKER, EXIT_MARKER};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a line marks a method entry or a method exit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// `>` marker
    Entry,
    /// `<` marker
    Exit,
}

impl Direction {
    /// Map an Xtrace direction marker to a direction
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            ENTRY_MARKER => Some(Direction::Entry),
            EXIT_MARKER => Some(Direction::Exit),
            _ => None,
        }
    }
}

/// Wall-clock time of day with millisecond precision
///
/// Values come straight from the log; out-of-range fields are not
/// rejected, they only feed the arithmetic in `as_millis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub millis: u64,
}

impl TimeOfDay {
    pub fn new(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            millis,
        }
    }

    /// Milliseconds since the start of the day
    pub fn as_millis(&self) -> u64 {
        ((self.hours * 60 + self.minutes) * 60 + self.seconds) * 1000 + self.millis
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:03}",
            self.hours, self.minutes, self.seconds, self.millis
        )
    }
}

/// A single method entry or exit parsed from the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    /// 1-based line number in the input
    pub line_number: usize,

    /// Time of day the event was logged
    pub timestamp: TimeOfDay,

    /// Hex thread token, e.g. `0x2a7b500`
    pub thread_id: String,

    /// Entry or exit
    pub direction: Direction,

    /// Method signature, e.g. `com/ibm/ws/util/BoundedBuffer.lock()V`
    pub method: String,
}
