use std::time::Duration;

use chrono::{Local, NaiveTime, Timelike};

/// Wall-clock instant in the host's local calendar, at whole-second precision.
///
/// Invariant: the wrapped time never carries a sub-second fraction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Samples the host clock.
    pub fn now() -> Self {
        Self::from_naive(Local::now().time())
    }

    /// Builds a fixed instant. Returns `None` for an out-of-range component.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(Self)
    }

    /// Drops the sub-second fraction of `t`.
    pub fn from_naive(t: NaiveTime) -> Self {
        // A leap second shows up as nanosecond >= 1e9; it still reads as :59.
        Self(t.with_nanosecond(0).unwrap_or(t))
    }

    #[inline]
    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    #[inline]
    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    #[inline]
    pub fn second(self) -> u32 {
        self.0.second()
    }

    #[inline]
    pub fn as_naive(self) -> NaiveTime {
        self.0
    }

    /// Adds `secs` seconds, wrapping at midnight.
    pub fn plus_seconds(self, secs: i64) -> Self {
        let (t, _) = self
            .0
            .overflowing_add_signed(chrono::TimeDelta::seconds(secs));
        Self(t)
    }

    /// Formats with a `chrono` strftime pattern.
    pub fn format(self, pattern: &str) -> String {
        self.0.format(pattern).to_string()
    }
}

/// Slack past each second boundary, so a sample taken at the deadline
/// already reads the new second despite timer jitter.
pub const SECOND_BOUNDARY_MARGIN: Duration = Duration::from_millis(2);

/// Delay from `now` until just past the next whole wall-clock second.
pub fn delay_to_next_second(now: NaiveTime) -> Duration {
    // `% 1e9` folds a leap second back into the current second.
    let nanos = now.nanosecond() % 1_000_000_000;
    Duration::from_nanos(u64::from(1_000_000_000 - nanos)) + SECOND_BOUNDARY_MARGIN
}

/// Delay from the host clock's current time until just past the next
/// whole second.
pub fn until_next_second() -> Duration {
    delay_to_next_second(Local::now().time())
}

/// Source of "now" for the clock state.
pub trait TimeSource {
    fn now(&mut self) -> ClockTime;
}

/// Reads the host's local calendar.
#[derive(Debug, Default, Copy, Clone)]
pub struct LocalTimeSource;

impl TimeSource for LocalTimeSource {
    fn now(&mut self) -> ClockTime {
        ClockTime::now()
    }
}

/// Deterministic source: starts at a fixed instant and advances by `step`
/// seconds on every sample after the first.
#[derive(Debug, Copy, Clone)]
pub struct FixedTimeSource {
    next: ClockTime,
    step: i64,
}

impl FixedTimeSource {
    /// Always returns `time`.
    pub fn new(time: ClockTime) -> Self {
        Self { next: time, step: 0 }
    }

    /// Returns `start`, then `start + step`, `start + 2 * step`, ...
    pub fn stepping(start: ClockTime, step: i64) -> Self {
        Self { next: start, step }
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&mut self) -> ClockTime {
        let t = self.next;
        self.next = t.plus_seconds(self.step);
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32, s: u32) -> ClockTime {
        ClockTime::from_hms(h, m, s).unwrap()
    }

    #[test]
    fn from_naive_truncates_fraction() {
        let raw = NaiveTime::from_hms_milli_opt(10, 20, 30, 999).unwrap();
        let ct = ClockTime::from_naive(raw);
        assert_eq!(ct, t(10, 20, 30));
        assert_eq!(ct.as_naive().nanosecond(), 0);
    }

    #[test]
    fn from_hms_rejects_out_of_range() {
        assert!(ClockTime::from_hms(24, 0, 0).is_none());
        assert!(ClockTime::from_hms(0, 60, 0).is_none());
    }

    #[test]
    fn plus_seconds_wraps_at_midnight() {
        assert_eq!(t(23, 59, 59).plus_seconds(1), t(0, 0, 0));
        assert_eq!(t(0, 0, 0).plus_seconds(-1), t(23, 59, 59));
    }

    #[test]
    fn now_has_no_fraction() {
        assert_eq!(ClockTime::now().as_naive().nanosecond(), 0);
    }

    #[test]
    fn until_next_second_is_at_most_one_second_plus_margin() {
        let d = until_next_second();
        assert!(d > SECOND_BOUNDARY_MARGIN, "{d:?}");
        assert!(d <= Duration::from_secs(1) + SECOND_BOUNDARY_MARGIN, "{d:?}");
    }

    #[test]
    fn sample_at_the_computed_deadline_reads_the_next_second() {
        for nanos in [0, 1, 250_000_000, 999_000_000, 999_999_999] {
            let start = NaiveTime::from_hms_nano_opt(10, 20, 30, nanos).unwrap();
            let delay = chrono::TimeDelta::from_std(delay_to_next_second(start)).unwrap();
            let (landed, _) = start.overflowing_add_signed(delay);
            assert_eq!(ClockTime::from_naive(landed), t(10, 20, 31), "from .{nanos:09}");
        }
    }

    #[test]
    fn leap_second_waits_for_the_following_minute() {
        let leap = NaiveTime::from_hms_nano_opt(23, 59, 59, 1_400_000_000).unwrap();
        assert_eq!(
            delay_to_next_second(leap),
            Duration::from_millis(600) + SECOND_BOUNDARY_MARGIN
        );
    }

    #[test]
    fn stepping_source_advances() {
        let mut src = FixedTimeSource::stepping(t(12, 0, 58), 1);
        assert_eq!(src.now(), t(12, 0, 58));
        assert_eq!(src.now(), t(12, 0, 59));
        assert_eq!(src.now(), t(12, 1, 0));

        let mut fixed = FixedTimeSource::new(t(3, 30, 0));
        assert_eq!(fixed.now(), fixed.now());
    }
}
