//! Circular orbit motion. Pure functions of elapsed time.
//!
//! Each body sits at `(orbit_radius, vertical_offset, 0)` inside an orbit-plane
//! group; the group turns about the vertical axis by the body's orbit angle.
//! The mesh additionally carries its axial tilt and an independent self-spin.
//!
//! Angles are accumulated in f64 (hours of scrolling × rad/s gets large) and
//! only wrapped and narrowed to f32 at the end.

use std::collections::HashMap;
use std::f64::consts::TAU;

use glam::{Quat, Vec3};

use crate::api::types::TextureHandle;
use crate::bodies::body::CelestialBody;

/// Derived per-frame orbit state of one body. Never stored between frames.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitState {
    /// Orbit-group rotation about +Y, in [0, 2π).
    pub angle: f32,
    /// Self-rotation of the mesh, in [0, 2π).
    pub spin: f32,
}

/// World placement of one body for the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTransform {
    pub position: Vec3,
    /// Axial tilt combined with self-spin.
    pub rotation: Quat,
    pub scale: f32,
    pub orbit_angle: f32,
    pub texture: TextureHandle,
    pub has_ring: bool,
    pub emissive: bool,
}

/// `(start + speed · t) mod 2π`, evaluated in f64.
pub fn wrapped_angle(start: f32, speed: f32, elapsed: f64) -> f32 {
    (start as f64 + speed as f64 * elapsed).rem_euclid(TAU) as f32
}

/// Position inside the orbit plane before the group rotation.
fn local_position(body: &CelestialBody) -> Vec3 {
    Vec3::new(body.orbit_radius, body.vertical_offset, 0.0)
}

/// Where a body sits for a given orbit-group angle.
pub fn orbit_position(body: &CelestialBody, angle: f32) -> Vec3 {
    Quat::from_rotation_y(angle) * local_position(body)
}

/// Where a body sits at t = 0. Camera keyframes aim here.
pub fn resting_position(body: &CelestialBody) -> Vec3 {
    orbit_position(body, body.start_angle)
}

impl OrbitState {
    /// State of a single body at `elapsed` seconds.
    pub fn at(body: &CelestialBody, elapsed: f64) -> Self {
        Self {
            angle: wrapped_angle(body.start_angle, body.orbit_speed, elapsed),
            spin: wrapped_angle(0.0, body.spin_speed, elapsed),
        }
    }

    /// Apply this state to the body's orbit group and mesh.
    pub fn transform(&self, body: &CelestialBody, texture: TextureHandle) -> BodyTransform {
        let rotation = Quat::from_rotation_z(body.axial_tilt) * Quat::from_rotation_y(self.spin);
        BodyTransform {
            position: orbit_position(body, self.angle),
            rotation,
            scale: body.visual_scale,
            orbit_angle: self.angle,
            texture,
            has_ring: body.has_ring,
            emissive: body.is_emissive(),
        }
    }
}

/// Advances every body's orbit. Stateless: no hidden counters, so the same
/// elapsed time always produces the same states.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrbitSimulator;

impl OrbitSimulator {
    pub fn new() -> Self {
        Self
    }

    /// Orbit state of every body keyed by name.
    pub fn advance(&self, bodies: &[CelestialBody], elapsed: f64) -> HashMap<String, OrbitState> {
        bodies
            .iter()
            .map(|b| (b.name.clone(), OrbitState::at(b, elapsed)))
            .collect()
    }

    /// Index-aligned variant for the frame loop. Reuses `out`'s allocation.
    pub fn advance_into(&self, bodies: &[CelestialBody], elapsed: f64, out: &mut Vec<OrbitState>) {
        out.clear();
        out.extend(bodies.iter().map(|b| OrbitState::at(b, elapsed)));
    }
}
