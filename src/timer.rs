use std::time::Duration;
use crate::backend::{TimerId, TimerService};

struct Interval {
    id: TimerId,
    period: Duration,
    elapsed: Duration,
}

/// Interval timers driven by frame time instead of a clock.
///
/// The host calls [`IntervalTimers::advance`] once per frame with the frame's
/// delta and turns the returned ids into tick notices.
#[derive(Default)]
pub struct IntervalTimers {
    next_id: u64,
    intervals: Vec<Interval>,
}

impl IntervalTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward and collect every timer that fired, once per elapsed
    /// period, in firing order per timer.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerId> {
        let mut fired = Vec::new();
        for interval in self.intervals.iter_mut() {
            if interval.period.is_zero() {
                // would fire forever within one frame
                fired.push(interval.id);
                continue;
            }
            interval.elapsed += dt;
            while interval.elapsed >= interval.period {
                interval.elapsed -= interval.period;
                fired.push(interval.id);
            }
        }
        fired
    }

    pub fn is_active(&self, timer: TimerId) -> bool {
        self.intervals.iter().any(|i| i.id == timer)
    }

    pub fn active_count(&self) -> usize {
        self.intervals.len()
    }
}

impl TimerService for IntervalTimers {
    fn set_interval(&mut self, period: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.intervals.push(Interval { id, period, elapsed: Duration::ZERO });
        id
    }

    fn clear_interval(&mut self, timer: TimerId) {
        self.intervals.retain(|i| i.id != timer);
    }
}
