use std::time::Instant;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Seconds since the clock was created, sampled at this tick.
    pub elapsed: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Wall-clock frame timer.
///
/// Samples time once per tick and reports the difference to the previous
/// sample. The baseline for the first frame is the moment the clock was
/// created, so the first `dt` covers startup time.
///
/// No clamping or fixed stepping is applied: animation speed follows the
/// achieved frame rate, and a stall produces one large `dt`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Instant,
    previous: f32,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Creates a clock whose zero point is `origin`.
    pub fn starting_at(origin: Instant) -> Self {
        Self {
            origin,
            previous: 0.0,
            frame_index: 0,
        }
    }

    /// Returns the previous sample, in seconds since the origin.
    pub fn previous(&self) -> f32 {
        self.previous
    }

    /// Samples wall time and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to the wall-clock instant `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let current = now.saturating_duration_since(self.origin).as_secs_f32();
        self.advance(current)
    }

    /// Advances the clock to `current` seconds since the origin.
    ///
    /// A timestamp earlier than the previous one yields `dt = 0` rather than a
    /// negative delta.
    pub fn advance(&mut self, current: f32) -> FrameTime {
        let dt = (current - self.previous).max(0.0);
        self.previous = current.max(self.previous);

        let ft = FrameTime {
            dt,
            elapsed: self.previous,
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
    use std::time::Duration;

    #[test]
    fn first_tick_measures_from_origin() {
        let origin = Instant::now();
        let mut clock = FrameClock::starting_at(origin);
        let ft = clock.tick_at(origin + Duration::from_millis(250));
        assert!((ft.dt - 0.25).abs() < 1e-6);
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn delta_is_difference_between_samples() {
        let mut clock = FrameClock::starting_at(Instant::now());
        clock.advance(1.0);
        let ft = clock.advance(1.5);
        assert_eq!(ft.dt, 0.5);
        assert_eq!(ft.elapsed, 1.5);
        assert_eq!(clock.previous(), 1.5);
        assert_eq!(ft.frame_index, 1);
    }

    #[test]
    fn large_gaps_are_not_clamped() {
        let mut clock = FrameClock::starting_at(Instant::now());
        let ft = clock.advance(7.0);
        assert_eq!(ft.dt, 7.0);
    }

    #[test]
    fn repeated_timestamp_yields_zero_delta() {
        let mut clock = FrameClock::starting_at(Instant::now());
        clock.advance(2.0);
        assert_eq!(clock.advance(2.0).dt, 0.0);
    }

    #[test]
    fn backwards_timestamp_does_not_go_negative() {
        let mut clock = FrameClock::starting_at(Instant::now());
        clock.advance(3.0);
        let ft = clock.advance(2.0);
        assert_eq!(ft.dt, 0.0);
        assert_eq!(clock.previous(), 3.0);
    }
}
