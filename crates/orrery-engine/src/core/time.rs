/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        // Hosts hand us NaN or negative deltas after tab switches.
        if !frame_dt.is_finite() || frame_dt < 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Tick-driven simulation clock.
///
/// Advances by `base_step * speed` per tick, so the visual rate is tied to
/// ticks rather than wall time. Negative speeds are clamped to zero, which
/// keeps the clock monotonically non-decreasing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimClock {
    time: f64,
    base_step: f64,
    speed: f64,
}

impl SimClock {
    pub fn new(base_step: f64) -> Self {
        Self {
            time: 0.0,
            base_step,
            speed: 1.0,
        }
    }

    /// Advance one tick. Returns the new time.
    pub fn advance(&mut self) -> f64 {
        self.time += self.base_step * self.speed;
        self.time
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Set the speed multiplier. Non-finite values are ignored, negatives clamp to 0.
    pub fn set_speed(&mut self, speed: f64) -> bool {
        if !speed.is_finite() {
            return false;
        }
        self.speed = speed.max(0.0);
        true
    }

    pub fn base_step(&self) -> f64 {
        self.base_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0 / 60.0);
        assert_eq!(steps, 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(0.008); // half a frame
        assert_eq!(steps, 0);
        let steps = ts.accumulate(0.010); // over one frame total
        assert_eq!(steps, 1);
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0); // 60 frames worth, but capped at 10
        assert_eq!(steps, 10);
    }

    #[test]
    fn rejects_bad_deltas() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(f32::NAN), 0);
        assert_eq!(ts.accumulate(-1.0), 0);
        assert_eq!(ts.alpha(), 0.0);
    }

    #[test]
    fn clock_advances_by_scaled_step() {
        let mut clock = SimClock::new(0.005);
        clock.set_speed(2.0);
        clock.advance();
        assert!((clock.time() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn clock_frozen_at_zero_speed() {
        let mut clock = SimClock::new(0.005);
        clock.advance();
        let t = clock.time();
        clock.set_speed(0.0);
        for _ in 0..100 {
            clock.advance();
        }
        assert_eq!(clock.time(), t);
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut clock = SimClock::new(0.005);
        assert!(clock.set_speed(-3.0));
        assert_eq!(clock.speed(), 0.0);
        assert!(!clock.set_speed(f64::INFINITY));
        assert_eq!(clock.speed(), 0.0);
    }
}
