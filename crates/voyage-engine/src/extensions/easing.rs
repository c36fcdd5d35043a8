// extensions/easing.rs
//
// Easing curves for keyframe segments.
// Only curves that stay inside [0, 1] are offered: an overshooting curve would
// carry the camera past a keyframe and possibly into a body.

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant velocity (no easing).
    Linear,
    /// Slow start and end. Same curve as the page animation driver's default in-out.
    #[default]
    QuadInOut,
    /// Stronger slow start and end.
    CubicInOut,
    /// Very strong slow start and end.
    QuartInOut,
    /// Sine wave easing (smooth).
    SineInOut,
    /// Hermite `3t² - 2t³`.
    SmoothStep,
    /// Perlin's `6t⁵ - 15t⁴ + 10t³`, zero second derivative at the ends.
    SmootherStep,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t` in [0, 1].
    /// Returns exactly 0.0 at `t = 0` and exactly 1.0 at `t = 1`.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,

            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }

            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }

            Easing::QuartInOut => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }

            // cos(PI) is not exactly -1.0 in f32, so pin the end.
            Easing::SineInOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    -((PI * t).cos() - 1.0) / 2.0
                }
            }

            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),

            Easing::SmootherStep => t * t * t * (t * (t * 6.0 - 15.0) + 10.0),
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
/// Written as `a(1-t) + bt` so that `t = 1` yields `b` bit-for-bit.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Linearly interpolate between two Vec3 values, exact at both ends.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 7] = [
        Easing::Linear,
        Easing::QuadInOut,
        Easing::CubicInOut,
        Easing::QuartInOut,
        Easing::SineInOut,
        Easing::SmoothStep,
        Easing::SmootherStep,
    ];

    #[test]
    fn endpoints_are_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
        }
    }

    #[test]
    fn in_out_curves_are_symmetric_at_midpoint() {
        for easing in ALL {
            let mid = easing.apply(0.5);
            assert!((mid - 0.5).abs() < 1e-6, "{easing:?} at 0.5 = {mid}");
        }
    }

    #[test]
    fn never_leaves_unit_interval() {
        for easing in ALL {
            for i in 0..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!((0.0..=1.0).contains(&v), "{easing:?} produced {v}");
            }
        }
    }

    #[test]
    fn monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!(v >= prev, "{easing:?} decreased at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn slow_start() {
        assert!(Easing::QuadInOut.apply(0.1) < 0.1);
        assert!(Easing::SmoothStep.apply(0.1) < 0.1);
    }

    #[test]
    fn out_of_range_time_is_clamped() {
        assert_eq!(Easing::QuadInOut.apply(-1.0), 0.0);
        assert_eq!(Easing::QuadInOut.apply(2.0), 1.0);
    }

    #[test]
    fn lerp_is_exact_at_ends() {
        let a = Vec3::new(0.1, -3.7, 12.9);
        let b = Vec3::new(44.3, 0.3, -0.7);
        assert_eq!(lerp_vec3(a, b, 0.0), a);
        assert_eq!(lerp_vec3(a, b, 1.0), b);
        assert_eq!(lerp(0.1, 0.3, 1.0), 0.3);
    }

    #[test]
    fn parses_snake_case() {
        let e: Easing = serde_json::from_str("\"cubic_in_out\"").unwrap();
        assert_eq!(e, Easing::CubicInOut);
    }
}
