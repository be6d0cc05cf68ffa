use std::time::{Duration, Instant};

/// Turns irregular wakeups into whole ticks at a fixed rate.
///
/// Time is accumulated and paid out in `period` steps. At most `max_steps` are
/// returned per call; anything beyond that is dropped so a long stall does not
/// cause a burst of catch-up updates.
#[derive(Debug, Clone)]
pub struct FixedStep {
    period: Duration,
    accumulated: Duration,
    max_steps: u32,
}

impl FixedStep {
    /// `fps` ticks per second; zero is treated as one.
    pub fn new(fps: u32) -> Self {
        Self::with_max_steps(fps, 5)
    }

    pub fn with_max_steps(fps: u32, max_steps: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / fps.max(1),
            accumulated: Duration::ZERO,
            max_steps: max_steps.max(1),
        }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Step length in seconds, the `dt` every tick is given.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.period.as_secs_f32()
    }

    /// Adds `elapsed` and returns how many ticks are due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let mut steps = 0;
        while self.accumulated >= self.period && steps < self.max_steps {
            self.accumulated -= self.period;
            steps += 1;
        }
        if steps == self.max_steps && self.accumulated >= self.period {
            log::debug!("fixed step fell behind, dropping {:?}", self.accumulated);
            self.accumulated = Duration::ZERO;
        }
        steps
    }

    /// When the next tick is due, given the time of the last `advance`.
    pub fn next_deadline(&self, last: Instant) -> Instant {
        last + self.period.saturating_sub(self.accumulated)
    }
}
