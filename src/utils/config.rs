//! Configuration and constants for the analyzer.

/// Current JSON report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Length of one day on the wall clock, in milliseconds.
/// Added to the running offset each time the time of day goes backwards.
pub const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

// Table layout
pub const DEFAULT_METHOD_WIDTH: usize = 60;
pub const MIN_METHOD_WIDTH: usize = 10;
pub const COUNT_COLUMN_WIDTH: usize = 7;
pub const TOTAL_COLUMN_WIDTH: usize = 12;
pub const AVG_COLUMN_WIDTH: usize = 10;

/// Marker inserted in the middle of method names that do not fit the column
pub const ELLIPSIS: &str = "...";

/// Xtrace direction markers
pub const ENTRY_MARKER: char = '>';
pub const EXIT_MARKER: char = '<';
