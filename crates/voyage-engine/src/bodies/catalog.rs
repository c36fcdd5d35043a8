//! Built-in catalog: the Sun and eight planets.
//!
//! Distances and sizes are scene units chosen for readability, not astronomy:
//! real proportions would leave every planet sub-pixel next to the Sun.
//! Orbit speeds are slow enough that a body barely drifts while the camera
//! is parked on it.

use std::f32::consts::PI;

use crate::bodies::body::CelestialBody;

pub const SUN: usize = 0;
pub const MERCURY: usize = 1;
pub const VENUS: usize = 2;
pub const EARTH: usize = 3;
pub const MARS: usize = 4;
pub const JUPITER: usize = 5;
pub const SATURN: usize = 6;
pub const URANUS: usize = 7;
pub const NEPTUNE: usize = 8;
pub const BODY_COUNT: usize = 9;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_SCALE: f32 = 5.0;
pub const SUN_COLOR: [f32; 3] = [1.0, 0.85, 0.45];
pub const SUN_SPIN: f32 = 0.05;

// ── Planets ──────────────────────────────────────────────────────────

/// Row of the planet table below.
struct PlanetRow {
    name: &'static str,
    radius: f32,
    scale: f32,
    speed: f32,
    /// Axial tilt in degrees.
    tilt_deg: f32,
    spin: f32,
    ring: bool,
}

const PLANETS: [PlanetRow; BODY_COUNT - 1] = [
    PlanetRow { name: "mercury", radius: 12.0, scale: 0.6,  speed: 0.080, tilt_deg: 0.03,  spin: 0.10, ring: false },
    PlanetRow { name: "venus",   radius: 18.0, scale: 0.95, speed: 0.060, tilt_deg: 177.4, spin: 0.05, ring: false },
    PlanetRow { name: "earth",   radius: 25.0, scale: 1.0,  speed: 0.050, tilt_deg: 23.4,  spin: 0.50, ring: false },
    PlanetRow { name: "mars",    radius: 32.0, scale: 0.7,  speed: 0.040, tilt_deg: 25.2,  spin: 0.48, ring: false },
    PlanetRow { name: "jupiter", radius: 45.0, scale: 2.4,  speed: 0.022, tilt_deg: 3.1,   spin: 1.20, ring: false },
    PlanetRow { name: "saturn",  radius: 60.0, scale: 2.0,  speed: 0.016, tilt_deg: 26.7,  spin: 1.10, ring: true  },
    PlanetRow { name: "uranus",  radius: 74.0, scale: 1.5,  speed: 0.011, tilt_deg: 97.8,  spin: 0.70, ring: false },
    PlanetRow { name: "neptune", radius: 86.0, scale: 1.45, speed: 0.008, tilt_deg: 28.3,  spin: 0.67, ring: false },
];

/// Deterministic starting phase so the planets don't line up on +X.
/// Golden-angle spacing spreads them evenly around the Sun.
fn start_angle(index: usize) -> f32 {
    const GOLDEN_ANGLE: f32 = PI * (3.0 - 2.236_068);
    (index as f32 * GOLDEN_ANGLE) % (2.0 * PI)
}

/// Small per-planet lift off the ecliptic, alternating sign.
fn vertical_offset(index: usize) -> f32 {
    let sign = if index % 2 == 0 { 1.0 } else { -1.0 };
    sign * 0.15 * index as f32
}

/// The default catalog in visit order.
pub fn default_bodies() -> Vec<CelestialBody> {
    let mut bodies = Vec::with_capacity(BODY_COUNT);
    bodies.push(
        CelestialBody::new("sun", 0.0, SUN_SCALE, "sun")
            .with_emissive(SUN_COLOR)
            .with_spin(SUN_SPIN),
    );
    for (i, row) in PLANETS.iter().enumerate() {
        let index = i + 1;
        let mut body = CelestialBody::new(row.name, row.radius, row.scale, row.name)
            .with_orbit(start_angle(index), row.speed)
            .with_tilt(row.tilt_deg.to_radians())
            .with_vertical_offset(vertical_offset(index))
            .with_spin(row.spin);
        if row.ring {
            body = body.with_ring();
        }
        bodies.push(body);
    }
    bodies
}
