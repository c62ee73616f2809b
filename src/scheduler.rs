//! Fixed-cadence gate for the sampling pipeline.

/// Default time between sampling passes, in milliseconds.
pub const SAMPLE_INTERVAL_MS: u64 = 5;

/// Free-running millisecond clock.
pub trait TickSource {
    /// Milliseconds since boot. Must never go backwards.
    fn now_ms(&self) -> u64;
}

impl<T> TickSource for &T
where
    T: TickSource + ?Sized,
{
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Opens at most once per interval.
///
/// The next eligible tick is computed from the tick at which the gate
/// actually opened, so a late caller skips the missed intervals instead of
/// running them back to back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleScheduler {
    next_sample_tick: u64,
    interval_ms: u64,
}

impl Default for SampleScheduler {
    fn default() -> Self {
        Self::new(SAMPLE_INTERVAL_MS)
    }
}

impl SampleScheduler {
    /// Create a scheduler that opens immediately, then every `interval_ms`.
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            next_sample_tick: 0,
            interval_ms,
        }
    }

    /// Returns `true` (and re-arms) if `now` has reached the next sample tick.
    pub fn try_open(&mut self, now: u64) -> bool {
        if now < self.next_sample_tick {
            return false;
        }
        self.next_sample_tick = now.saturating_add(self.interval_ms);
        true
    }

    /// Tick at which the gate will next open.
    pub fn next_sample_tick(&self) -> u64 {
        self.next_sample_tick
    }

    /// Configured interval in milliseconds.
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Open on the next call regardless of the current tick.
    pub fn reset(&mut self) {
        self.next_sample_tick = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_opens_immediately() {
        let mut scheduler = SampleScheduler::default();
        assert!(scheduler.try_open(0));
        assert_eq!(scheduler.next_sample_tick(), SAMPLE_INTERVAL_MS);
    }

    #[test]
    fn first_call_opens_at_any_tick() {
        let mut scheduler = SampleScheduler::default();
        assert!(scheduler.try_open(123_456));
        assert_eq!(scheduler.next_sample_tick(), 123_461);
    }

    #[test]
    fn closed_within_interval() {
        let mut scheduler = SampleScheduler::new(5);
        assert!(scheduler.try_open(100));
        for now in 100..105 {
            assert!(!scheduler.try_open(now), "opened at {}", now);
        }
        assert!(scheduler.try_open(105));
    }

    #[test]
    fn late_call_skips_missed_intervals() {
        let mut scheduler = SampleScheduler::new(5);
        assert!(scheduler.try_open(0));

        // 23 ms late: runs once, re-arms from 23, no catch-up.
        assert!(scheduler.try_open(23));
        assert_eq!(scheduler.next_sample_tick(), 28);
        assert!(!scheduler.try_open(24));
        assert!(!scheduler.try_open(27));
        assert!(scheduler.try_open(28));
    }

    #[test]
    fn reset_reopens() {
        let mut scheduler = SampleScheduler::new(5);
        assert!(scheduler.try_open(50));
        assert!(!scheduler.try_open(51));

        scheduler.reset();
        assert!(scheduler.try_open(51));
    }
}
