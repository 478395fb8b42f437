//! xtrace-stats
//!
//! Per-method call counts and durations from IBM Xtrace
//! `iprint=mt` method entry/exit logs.
//!
//! Entries and exits are matched per thread id, innermost first, so
//! interleaved threads and lost exits do not corrupt each other.
//! Time-of-day stamps are made monotonic across midnight.
//!
//! ## Getting Started
//!
//! ```bash
//! xtrace-stats native_stderr.log --top 20 --sort avg
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
