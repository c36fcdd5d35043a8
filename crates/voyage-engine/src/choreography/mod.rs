pub mod engine;
pub mod keyframes;
pub mod timeline;
pub mod view_mode;

pub use engine::ChoreographyEngine;
pub use keyframes::{build_keyframes, CameraKeyframe};
pub use timeline::{pose_at, ScrollTimeline};
pub use view_mode::{ViewMode, ViewModeController};
