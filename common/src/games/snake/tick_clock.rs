use std::time::Duration;

/// Frame-delta accumulator for hosts that drive the simulation from a render
/// loop instead of a timer.
#[derive(Clone, Debug)]
pub struct TickClock {
    interval: Duration,
    accumulated: Duration,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Adds a frame delta and returns how many ticks became due.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }

        self.accumulated += delta;
        let mut due = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            due += 1;
        }
        due
    }

    /// Fraction of the current interval already elapsed, in `[0, 1)`.
    pub fn progress(&self) -> f32 {
        if self.interval.is_zero() {
            return 0.0;
        }
        self.accumulated.as_secs_f32() / self.interval.as_secs_f32()
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}
