//! Wall-clock normalization with midnight rollover.
//!
//! Xtrace only logs the time of day. To get durations across midnight we
//! keep a running day offset: whenever the time of day goes backwards we
//! assume the clock wrapped once and add a day.
//!
//! The state is an explicit value. `normalize` takes the previous state and
//! returns the next one, so there is no hidden mutation between calls.

use super::schema::TimeOfDay;
use crate::utils::config::MILLIS_PER_DAY;
use log::debug;

/// Absolute milliseconds since the start of the first day in the trace
pub type AbsoluteTime = u64;

/// Rollover state carried from one event to the next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockState {
    /// Accumulated offset, a multiple of `MILLIS_PER_DAY`
    pub day_offset: u64,

    /// Absolute time of the previous event, `None` before the first one
    pub last_absolute_time: Option<AbsoluteTime>,
}

impl ClockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of midnight rollovers seen so far
    pub fn rollovers(&self) -> u64 {
        self.day_offset / MILLIS_PER_DAY
    }
}

/// Convert a time of day into an absolute time
///
/// **Public** - called once per parsed event, in input order
///
/// # Arguments
/// * `state` - State returned by the previous call (or `ClockState::new()`)
/// * `time_of_day` - Milliseconds since midnight
///
/// # Returns
/// The absolute time and the state to pass to the next call.
/// Handles at most one rollover between two consecutive events.
pub fn normalize(state: ClockState, time_of_day: u64) -> (AbsoluteTime, ClockState) {
    let mut day_offset = state.day_offset;
    let mut candidate = time_of_day + day_offset;

    if let Some(last) = state.last_absolute_time {
        if candidate < last {
            day_offset += MILLIS_PER_DAY;
            candidate = time_of_day + day_offset;
            debug!(
                "Clock went backwards ({} < {}), assuming midnight rollover",
                time_of_day + state.day_offset,
                last
            );
        }
    }

    (
        candidate,
        ClockState {
            day_offset,
            last_absolute_time: Some(candidate),
        },
    )
}

/// Convenience wrapper over `normalize` for a parsed timestamp
pub fn normalize_time(state: ClockState, timestamp: &TimeOfDay) -> (AbsoluteTime, ClockState) {
    normalize(state, timestamp.as_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_event_has_no_offset() {
        let (abs, state) = normalize(ClockState::new(), 36_000_000);
        assert_eq!(abs, 36_000_000);
        assert_eq!(state.day_offset, 0);
        assert_eq!(state.last_absolute_time, Some(36_000_000));
    }

    #[test]
    fn test_midnight_rollover() {
        let before = TimeOfDay::new(23, 59, 59, 900);
        let after = TimeOfDay::new(0, 0, 0, 100);

        let (t1, state) = normalize_time(ClockState::new(), &before);
        let (t2, state) = normalize_time(state, &after);

        assert!(t2 > t1);
        assert_eq!(t2 - t1, 200);
        assert_eq!(state.rollovers(), 1);
    }

    #[test]
    fn test_equal_times_do_not_roll_over() {
        let (t1, state) = normalize(ClockState::new(), 500);
        let (t2, state) = normalize(state, 500);
        assert_eq!(t1, t2);
        assert_eq!(state.day_offset, 0);
    }

    #[test]
    fn test_offset_persists_after_rollover() {
        let (_, state) = normalize(ClockState::new(), MILLIS_PER_DAY - 10);
        let (_, state) = normalize(state, 10);
        let (t3, state) = normalize(state, 20);
        assert_eq!(t3, MILLIS_PER_DAY + 20);
        assert_eq!(state.rollovers(), 1);
    }

    #[test]
    fn test_multiple_rollovers() {
        let mut state = ClockState::new();
        let mut last = 0;
        for tod in [80_000_000, 1_000, 80_000_000, 2_000] {
            let (abs, next) = normalize(state, tod);
            assert!(abs >= last);
            last = abs;
            state = next;
        }
        assert_eq!(state.rollovers(), 2);
        assert_eq!(last, 2 * MILLIS_PER_DAY + 2_000);
    }
}
