use serde::{Deserialize, Serialize};

use crate::api::types::TextureRef;

/// One entry of the star-system catalog.
///
/// Angles are radians, speeds radians per second, distances scene units.
/// `visual_scale` doubles as the body's visual radius when keeping the
/// camera out of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    /// Unique, stable key.
    pub name: String,
    /// Distance from the anchor. 0 for the anchor itself.
    pub orbit_radius: f32,
    /// Orbital phase at t = 0.
    #[serde(default)]
    pub start_angle: f32,
    /// Orbital angular speed. 0 = stationary.
    #[serde(default)]
    pub orbit_speed: f32,
    #[serde(default)]
    pub axial_tilt: f32,
    /// Height above the orbit plane.
    #[serde(default)]
    pub vertical_offset: f32,
    pub visual_scale: f32,
    pub texture: TextureRef,
    /// Self-illumination color (the anchor star).
    #[serde(default)]
    pub emissive_color: Option<[f32; 3]>,
    #[serde(default)]
    pub has_ring: bool,
    /// Self-rotation about the tilted axis, independent of the orbit.
    #[serde(default)]
    pub spin_speed: f32,
}

impl CelestialBody {
    /// A stationary body with no tilt, offset or spin.
    pub fn new(name: &str, orbit_radius: f32, visual_scale: f32, texture: &str) -> Self {
        Self {
            name: name.to_owned(),
            orbit_radius,
            start_angle: 0.0,
            orbit_speed: 0.0,
            axial_tilt: 0.0,
            vertical_offset: 0.0,
            visual_scale,
            texture: TextureRef::from(texture),
            emissive_color: None,
            has_ring: false,
            spin_speed: 0.0,
        }
    }

    pub fn with_orbit(mut self, start_angle: f32, orbit_speed: f32) -> Self {
        self.start_angle = start_angle;
        self.orbit_speed = orbit_speed;
        self
    }

    pub fn with_tilt(mut self, axial_tilt: f32) -> Self {
        self.axial_tilt = axial_tilt;
        self
    }

    pub fn with_vertical_offset(mut self, offset: f32) -> Self {
        self.vertical_offset = offset;
        self
    }

    pub fn with_emissive(mut self, color: [f32; 3]) -> Self {
        self.emissive_color = Some(color);
        self
    }

    pub fn with_ring(mut self) -> Self {
        self.has_ring = true;
        self
    }

    pub fn with_spin(mut self, spin_speed: f32) -> Self {
        self.spin_speed = spin_speed;
        self
    }

    /// Whether this is the central body everything orbits.
    pub fn is_anchor(&self) -> bool {
        self.orbit_radius == 0.0
    }

    pub fn is_emissive(&self) -> bool {
        self.emissive_color.is_some()
    }
}
