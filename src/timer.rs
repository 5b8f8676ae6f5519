// src/timer.rs
use std::time::{Duration, Instant};

/// A polled interval timer for the UI refresh. Arming it again replaces
/// whatever schedule was running before.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Ticker { period, next: None }
    }

    /// One tick per second.
    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    pub fn start(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// True when a period has elapsed since the last firing. After a long
    /// stall this fires once and reschedules from `now`, it never catches up.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next {
            Some(due) if now >= due => {
                let mut next = due + self.period;
                if next <= now {
                    next = now + self.period;
                }
                self.next = Some(next);
                true
            }
            _ => false,
        }
    }
}

/// Whole seconds between `start` and `now`, rounded down.
pub fn elapsed_whole_secs(start: Instant, now: Instant) -> u64 {
    now.saturating_duration_since(start).as_secs()
}
