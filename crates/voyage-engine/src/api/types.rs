use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Opaque texture reference carried by a catalog entry.
/// Resolved to a [`TextureHandle`] by the asset collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureRef(pub String);

impl TextureRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TextureRef {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

/// Renderer-side texture slot. `0` is reserved for the placeholder texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    /// Drawn when the asset collaborator could not provide a texture.
    pub const PLACEHOLDER: TextureHandle = TextureHandle(0);

    pub fn is_placeholder(self) -> bool {
        self == Self::PLACEHOLDER
    }
}

/// Where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    /// Unit view direction, or zero if position and target coincide.
    pub fn forward(&self) -> Vec3 {
        (self.look_at - self.position).normalize_or_zero()
    }

    /// Up vector the renderer should use for this pose.
    /// Looking straight up or down makes +Y degenerate, so -Z is used instead.
    pub fn up_hint(&self) -> Vec3 {
        if self.forward().y.abs() > 0.999 {
            Vec3::NEG_Z
        } else {
            Vec3::Y
        }
    }
}
