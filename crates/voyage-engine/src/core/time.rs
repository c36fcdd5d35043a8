/// Elapsed-time accumulator driving orbits and the twinkle uniform.
///
/// Frame deltas come straight from `requestAnimationFrame`, so they are capped:
/// a tab returning from the background should not fling every planet halfway
/// around its orbit in one frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Seconds since the scene started. f64 keeps long sessions precise.
    elapsed: f64,
    /// Largest delta accepted per frame.
    max_dt: f32,
    /// Frames advanced so far.
    frames: u64,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            elapsed: 0.0,
            max_dt,
            frames: 0,
        }
    }

    /// Add one frame's delta. Negative or non-finite deltas count as zero.
    /// Returns the new elapsed time.
    pub fn advance(&mut self, frame_dt: f32) -> f64 {
        let dt = if frame_dt.is_finite() && frame_dt > 0.0 {
            frame_dt.min(self.max_dt)
        } else {
            0.0
        };
        self.elapsed += dt as f64;
        self.frames += 1;
        self.elapsed
    }

    /// Seconds since start.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Elapsed time as the f32 shader uniform.
    pub fn uniform(&self) -> f32 {
        self.elapsed as f32
    }

    /// Number of `advance` calls.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates() {
        let mut clock = FrameClock::new(0.1);
        clock.advance(1.0 / 60.0);
        clock.advance(1.0 / 60.0);
        assert!((clock.elapsed() - 2.0 / 60.0).abs() < 1e-6);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn caps_long_frames() {
        let mut clock = FrameClock::new(0.1);
        clock.advance(5.0);
        assert!((clock.elapsed() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn ignores_bad_deltas() {
        let mut clock = FrameClock::new(0.1);
        clock.advance(-1.0);
        clock.advance(f32::NAN);
        clock.advance(f32::INFINITY);
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.frames(), 3);
    }
}
