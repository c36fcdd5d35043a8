pub mod api;
pub mod assets;
pub mod bodies;
pub mod bridge;
pub mod choreography;
pub mod core;
pub mod extensions;
pub mod input;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{KeyframeTuning, StarfieldConfig, VoyageConfig};
pub use api::error::{ConfigError, ConfigResult};
pub use api::types::{CameraPose, TextureHandle, TextureRef};
pub use assets::manifest::TextureManifest;
pub use assets::registry::{TextureRegistry, TextureSource};
pub use bodies::{BodyRegistry, CelestialBody};
pub use bridge::protocol::{FrameBuffer, FrameLayout, BODY_FLOATS, HEADER_FLOATS};
pub use choreography::{
    build_keyframes, pose_at, CameraKeyframe, ChoreographyEngine, ScrollTimeline, ViewMode,
    ViewModeController,
};
pub use core::scene::{FrameOutput, Scene};
pub use core::time::FrameClock;
pub use extensions::Easing;
pub use input::scroll::{ScrollBinding, ScrollTracker};
pub use systems::lighting::SideLight;
pub use systems::orbit::{BodyTransform, OrbitSimulator, OrbitState};
pub use systems::starfield::{StarDistribution, StarPoint, StarVertex, Starfield};
