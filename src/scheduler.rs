//! Soft timers for task loops.
//!
//! A timer only records when it is due. The owning task sleeps until the
//! earliest deadline (together with whatever else it waits on) and then
//! polls its timers with the current time.

use embassy_time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SoftTimer {
    deadline: Option<Instant>,
    period: Option<Duration>,
}

impl SoftTimer {
    pub const fn new() -> Self {
        Self {
            deadline: None,
            period: None,
        }
    }

    /// Fire once, `after` from `now`. Replaces any pending schedule.
    pub fn schedule_once(&mut self, now: Instant, after: Duration) {
        self.deadline = Some(now + after);
        self.period = None;
    }

    /// Fire every `period`, first time one period from `now`
    pub fn schedule_periodic(&mut self, now: Instant, period: Duration) {
        self.deadline = Some(now + period);
        self.period = Some(period);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
        self.period = None;
    }

    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume an expiry at `now`
    ///
    /// Returns `true` once per expiry. Periodic timers re-arm themselves;
    /// if more than one period was missed the backlog is dropped instead of
    /// firing in a burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        self.deadline = self.period.map(|period| {
            let next = deadline + period;
            if next <= now { now + period } else { next }
        });
        true
    }
}

/// Earliest of two optional deadlines
pub fn earliest(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}
