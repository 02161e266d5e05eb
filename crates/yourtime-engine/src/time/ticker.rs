use std::time::{Duration, Instant};

/// Smallest accepted period; a zero period would spin the event loop.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A single timer firing.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Tick {
    /// Monotonic tick counter, starting at 0.
    pub index: u64,

    /// The deadline this tick was scheduled for.
    pub scheduled: Instant,

    /// Whole periods that elapsed without a tick (e.g. the process was
    /// suspended). They are not replayed.
    pub skipped: u64,
}

/// Repeating interval scheduler.
///
/// Deadlines sit on a fixed grid `start + n * period`, so late polls do not
/// accumulate drift. If the loop falls a full period or more behind, the
/// ticker fires once and re-bases the grid onto the poll time instead of
/// firing a burst of stale ticks.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next: Instant,
    index: u64,
}

impl Ticker {
    /// Creates a ticker whose first deadline is `start + period`.
    pub fn new(period: Duration, start: Instant) -> Self {
        let period = period.max(MIN_PERIOD);
        Self {
            period,
            next: start + period,
            index: 0,
        }
    }

    /// Creates a ticker whose first deadline is `first`.
    pub fn starting_at(period: Duration, first: Instant) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            next: first,
            index: 0,
        }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// The instant at which the next tick becomes due.
    #[inline]
    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Moves the next deadline to `next`; later deadlines follow on the
    /// period grid from there. The tick index is kept.
    pub fn rearm(&mut self, next: Instant) {
        self.next = next;
    }

    /// Returns the tick that is due at `now`, if any, and schedules the next one.
    pub fn poll(&mut self, now: Instant) -> Option<Tick> {
        if now < self.next {
            return None;
        }

        let scheduled = self.next;
        let late = now.saturating_duration_since(scheduled);
        let skipped = (late.as_nanos() / self.period.as_nanos()) as u64;

        if skipped == 0 {
            self.next = scheduled + self.period;
        } else {
            log::debug!("ticker fell {skipped} period(s) behind; re-basing");
            self.next = now + self.period;
        }

        let tick = Tick {
            index: self.index,
            scheduled,
            skipped,
        };
        self.index = self.index.wrapping_add(1);
        Some(tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn nothing_is_due_before_the_first_deadline() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(SEC, t0);
        assert_eq!(ticker.deadline(), t0 + SEC);
        assert!(ticker.poll(t0).is_none());
        assert!(ticker.poll(t0 + ms(999)).is_none());
    }

    #[test]
    fn fires_exactly_at_the_deadline() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(SEC, t0);
        let tick = ticker.poll(t0 + SEC).unwrap();
        assert_eq!(tick.index, 0);
        assert_eq!(tick.scheduled, t0 + SEC);
        assert_eq!(tick.skipped, 0);
        assert_eq!(ticker.deadline(), t0 + 2 * SEC);
    }

    #[test]
    fn fires_once_per_deadline() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(SEC, t0);
        assert!(ticker.poll(t0 + SEC).is_some());
        assert!(ticker.poll(t0 + SEC + ms(1)).is_none());
    }

    #[test]
    fn late_polls_do_not_drift() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(SEC, t0);
        for n in 1..=5u32 {
            // Wake 300ms late every time; the grid must not move.
            let tick = ticker.poll(t0 + SEC * n + ms(300)).unwrap();
            assert_eq!(tick.scheduled, t0 + SEC * n);
            assert_eq!(tick.index, u64::from(n - 1));
        }
        assert_eq!(ticker.deadline(), t0 + SEC * 6);
    }

    #[test]
    fn long_stall_yields_a_single_catch_up_tick() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(SEC, t0);
        let wake = t0 + SEC * 10 + ms(250);

        let tick = ticker.poll(wake).unwrap();
        assert_eq!(tick.skipped, 9);
        assert!(ticker.poll(wake).is_none());
        assert_eq!(ticker.deadline(), wake + SEC);
    }

    #[test]
    fn zero_period_is_clamped() {
        let t0 = Instant::now();
        let ticker = Ticker::new(Duration::ZERO, t0);
        assert_eq!(ticker.period(), MIN_PERIOD);
        assert!(ticker.deadline() > t0);
    }

    #[test]
    fn starting_at_uses_the_given_first_deadline() {
        let t0 = Instant::now();
        let mut ticker = Ticker::starting_at(SEC, t0 + ms(400));
        assert!(ticker.poll(t0 + ms(399)).is_none());
        assert_eq!(ticker.poll(t0 + ms(400)).map(|t| t.index), Some(0));
        assert_eq!(ticker.deadline(), t0 + ms(1400));
    }

    #[test]
    fn rearm_restores_phase_after_a_stall() {
        let t0 = Instant::now();
        let mut ticker = Ticker::starting_at(SEC, t0 + ms(5));
        let wake = t0 + SEC * 3 + ms(640);

        let tick = ticker.poll(wake).unwrap();
        assert!(tick.skipped > 0);
        assert_eq!(ticker.deadline(), wake + SEC);

        // Back onto the original phase: 5ms past the next whole second.
        ticker.rearm(t0 + SEC * 4 + ms(5));
        assert!(ticker.poll(t0 + SEC * 4 + ms(4)).is_none());
        let tick = ticker.poll(t0 + SEC * 4 + ms(5)).unwrap();
        assert_eq!(tick.index, 1);
        assert_eq!(tick.skipped, 0);
        assert_eq!(ticker.deadline(), t0 + SEC * 5 + ms(5));
    }
}
