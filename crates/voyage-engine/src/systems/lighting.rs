//! Camera-attached side light.
//!
//! The light keeps a fixed offset from the camera every frame, in both view
//! modes, so the lit hemisphere of whatever body is in view faces the viewer
//! at an angle instead of head-on. The renderer also casts shadows from it.

use glam::Vec3;

use crate::api::types::CameraPose;

/// A directional-looking point light that follows the camera.
///
/// Wire format (3 floats): `[x, y, z]` of [`SideLight::position`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideLight {
    /// Position relative to the camera.
    pub offset: Vec3,
    /// Current world position.
    pub position: Vec3,
}

impl SideLight {
    pub fn new(offset: Vec3) -> Self {
        Self {
            offset,
            position: offset,
        }
    }

    /// Move the light to its offset from the camera. Returns the new position.
    pub fn track(&mut self, camera: &CameraPose) -> Vec3 {
        self.position = camera.position + self.offset;
        self.position
    }
}

impl Default for SideLight {
    fn default() -> Self {
        Self::new(Vec3::new(12.0, 6.0, 0.0))
    }
}
