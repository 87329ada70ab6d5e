/// Countdown clock for a timed session. Ticks are delivered by the event
/// runtime; the clock itself never schedules anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionClock {
    total_secs: f64,
    remaining_secs: f64,
}

impl SessionClock {
    pub fn new(total_secs: f64) -> Self {
        Self {
            total_secs,
            remaining_secs: total_secs,
        }
    }

    /// Advance the clock by one tick interval.
    pub fn tick(&mut self, interval_ms: u64) {
        self.remaining_secs -= interval_ms as f64 / 1000.0;
    }

    pub fn total_secs(&self) -> f64 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> f64 {
        self.remaining_secs.max(0.0)
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.total_secs - self.remaining_secs.max(0.0)
    }

    pub fn timed_out(&self) -> bool {
        self.remaining_secs <= 0.0
    }
}
