//! Tick source owned by a driving loop
//!
//! Each loop holds exactly one [`TickScheduler`] per simulation it advances,
//! which serializes transitions on that simulation. Dropping or cancelling
//! the scheduler releases the timer.

use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

pub struct TickScheduler {
    interval: Interval,
    period: Duration,
}

impl TickScheduler {
    /// First tick fires one `period` from now
    pub fn new(period: Duration) -> Self {
        Self {
            interval: Self::arm(period),
            period,
        }
    }

    fn arm(period: Duration) -> Interval {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait for the next trigger
    pub async fn tick(&mut self) -> Instant {
        self.interval.tick().await
    }

    /// Re-arm with a new period. Returns false when the period is unchanged
    /// and the running timer was left alone.
    pub fn set_period(&mut self, period: Duration) -> bool {
        if period == self.period {
            return false;
        }

        log::debug!("Tick period {:?} -> {:?}", self.period, period);
        self.interval = Self::arm(period);
        self.period = period;
        true
    }

    pub fn cancel(self) {
        log::debug!("Tick scheduler cancelled ({:?})", self.period);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_waits_one_period() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new(Duration::from_millis(100));

        scheduler.tick().await;

        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_follow_period() {
        let mut scheduler = TickScheduler::new(Duration::from_millis(50));
        let first = scheduler.tick().await;
        let second = scheduler.tick().await;

        assert_eq!(second - first, Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_period_rearms_only_on_change() {
        let mut scheduler = TickScheduler::new(Duration::from_millis(150));

        assert!(!scheduler.set_period(Duration::from_millis(150)));
        assert!(scheduler.set_period(Duration::from_millis(140)));
        assert_eq!(scheduler.period(), Duration::from_millis(140));

        let start = Instant::now();
        scheduler.tick().await;
        assert!(start.elapsed() >= Duration::from_millis(140));

        scheduler.cancel();
    }
}
