use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Wall clock producing `FrameTime` snapshots.
///
/// Delta time is clamped so a stall (debugger, minimized window) does not feed
/// one huge step into the game.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a clock clamping dt to `[0.1 ms, 250 ms]`.
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the baseline, e.g. after the window was hidden.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_is_clamped_both_ways() {
        let start = Instant::now();
        let mut clock = FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(100));
        clock.last = start;

        let ft = clock.tick_at(start);
        assert!((ft.dt - 0.001).abs() < 1e-6);

        let ft = clock.tick_at(start + Duration::from_secs(5));
        assert!((ft.dt - 0.1).abs() < 1e-6);
    }

    #[test]
    fn frame_index_counts_ticks() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick_at(start).frame_index, 0);
        assert_eq!(clock.tick_at(start + Duration::from_millis(16)).frame_index, 1);
    }
}
