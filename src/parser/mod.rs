//! Trace line parsing and time normalization.
//!
//! This module handles:
//! - Matching Xtrace method entry/exit lines
//! - Converting time-of-day stamps to absolute milliseconds
//! - Defining the parsed event types

pub mod clock;
pub mod schema;
pub mod xtrace;

// Re-export main types
pub use clock::{normalize, normalize_time, AbsoluteTime, ClockState};
pub use schema::{Direction, TimeOfDay, TraceEvent};
pub use xtrace::{parse_line, parse_time_of_day};
