use crate::cell::{Observable, SubscriptionId};
use crate::time::{ClockTime, LocalTimeSource, TimeSource};

/// Owner of the current clock time.
///
/// The holder is the only writer; views read through [`ClockState::time`] or
/// subscribe to be told when it changes.
pub struct ClockState {
    time: Observable<ClockTime>,
    source: Box<dyn TimeSource>,
}

impl ClockState {
    /// State driven by the host's local calendar.
    pub fn new() -> Self {
        Self::with_source(LocalTimeSource)
    }

    /// State seeded from, and later refreshed by, `source`.
    pub fn with_source(mut source: impl TimeSource + 'static) -> Self {
        let initial = source.now();
        Self {
            time: Observable::new(initial),
            source: Box::new(source),
        }
    }

    #[inline]
    pub fn time(&self) -> ClockTime {
        *self.time.get()
    }

    /// Samples the time source and stores the result, notifying subscribers.
    ///
    /// Always writes, even when the sampled second has not changed.
    pub fn tick(&mut self) -> ClockTime {
        let now = self.source.now();
        log::trace!("clock tick: {}", now.format("%H:%M:%S"));
        self.time.set(now);
        now
    }

    pub fn subscribe(&mut self, f: impl FnMut(&ClockTime) + 'static) -> SubscriptionId {
        self.time.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.time.unsubscribe(id)
    }
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new()
    }
}
