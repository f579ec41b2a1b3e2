//! Re-armable fixed-interval tick timer.
//!
//! The scheduler owns at most one tick stream. Arming replaces the previous
//! stream and forgets its accumulated time, so navigation can never leave two
//! timers feeding the same simulation.

use std::time::Duration;

/// Upper bound on ticks released by a single [`Scheduler::advance`] call.
pub const MAX_CATCH_UP_TICKS: u32 = 8;

/// Accumulates wall-clock time and releases simulation ticks at a fixed interval.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    interval: Option<Duration>,
    accumulator: Duration,
    due: u32,
}

impl Scheduler {
    /// Creates a disarmed scheduler.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interval: None,
            accumulator: Duration::ZERO,
            due: 0,
        }
    }

    /// Starts a fresh tick stream, discarding the previous one.
    pub fn arm(&mut self, interval: Duration) {
        log::debug!("scheduler armed at {interval:?}");
        self.interval = Some(interval);
        self.accumulator = Duration::ZERO;
        self.due = 0;
    }

    /// Stops the current tick stream.
    pub fn cancel(&mut self) {
        self.interval = None;
        self.accumulator = Duration::ZERO;
        self.due = 0;
    }

    /// Interval of the armed stream, if any.
    #[must_use]
    pub const fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Adds elapsed time and resolves how many ticks became due.
    ///
    /// At most [`MAX_CATCH_UP_TICKS`] are released per call. Whole intervals
    /// beyond that are dropped; the sub-interval remainder is kept.
    pub fn advance(&mut self, dt: Duration) {
        let Some(interval) = self.interval.filter(|interval| !interval.is_zero()) else {
            return;
        };

        self.accumulator = self.accumulator.saturating_add(dt);
        while self.accumulator >= interval && self.due < MAX_CATCH_UP_TICKS {
            self.accumulator -= interval;
            self.due += 1;
        }

        if self.accumulator >= interval {
            let remainder = self.accumulator.as_nanos() % interval.as_nanos();
            log::debug!(
                "scheduler dropped {:?} of backlog",
                self.accumulator.saturating_sub(interval)
            );
            self.accumulator = Duration::from_nanos(u64::try_from(remainder).unwrap_or(0));
        }
    }

    /// Takes one due tick. Returns `false` once none remain.
    pub fn poll(&mut self) -> bool {
        if self.due == 0 {
            return false;
        }
        self.due -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(16);

    fn drain(scheduler: &mut Scheduler) -> u32 {
        let mut ticks = 0;
        while scheduler.poll() {
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn disarmed_scheduler_never_ticks() {
        let mut scheduler = Scheduler::new();
        scheduler.advance(Duration::from_secs(1));
        assert!(!scheduler.poll());
    }

    #[test]
    fn releases_one_tick_per_interval() {
        let mut scheduler = Scheduler::new();
        scheduler.arm(INTERVAL);

        scheduler.advance(Duration::from_millis(10));
        assert_eq!(drain(&mut scheduler), 0);

        scheduler.advance(Duration::from_millis(10));
        assert_eq!(drain(&mut scheduler), 1);

        scheduler.advance(Duration::from_millis(28));
        assert_eq!(drain(&mut scheduler), 2);
    }

    #[test]
    fn catch_up_is_capped() {
        let mut scheduler = Scheduler::new();
        scheduler.arm(INTERVAL);

        scheduler.advance(Duration::from_secs(10));
        assert_eq!(drain(&mut scheduler), MAX_CATCH_UP_TICKS);

        scheduler.advance(Duration::from_millis(15));
        assert!(drain(&mut scheduler) <= 1);
    }

    #[test]
    fn arming_discards_pending_time() {
        let mut scheduler = Scheduler::new();
        scheduler.arm(INTERVAL);
        scheduler.advance(Duration::from_millis(40));

        scheduler.arm(Duration::from_millis(100));
        assert!(!scheduler.poll());
        assert_eq!(scheduler.interval(), Some(Duration::from_millis(100)));

        scheduler.advance(Duration::from_millis(99));
        assert!(!scheduler.poll());
    }

    #[test]
    fn cancel_disarms() {
        let mut scheduler = Scheduler::new();
        scheduler.arm(INTERVAL);
        scheduler.cancel();
        scheduler.advance(Duration::from_secs(1));
        assert_eq!(scheduler.interval(), None);
        assert!(!scheduler.poll());
    }
}
