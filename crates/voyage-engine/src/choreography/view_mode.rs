use glam::Vec3;
use log::debug;

use crate::api::types::CameraPose;
use crate::bodies::registry::BodyRegistry;
use crate::choreography::engine::ChoreographyEngine;

/// Overhead height as a multiple of the outermost orbit.
pub const OVERHEAD_HEIGHT_FACTOR: f32 = 1.6;

/// Which source drives the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Camera follows the scroll timeline.
    #[default]
    ScrollDriven,
    /// Camera parked above the anchor, scrolling locked.
    FixedOverhead,
}

impl ViewMode {
    /// Wire code: 0 = scroll driven, 1 = overhead.
    pub fn code(self) -> f32 {
        match self {
            ViewMode::ScrollDriven => 0.0,
            ViewMode::FixedOverhead => 1.0,
        }
    }

    /// Inverse of [`Self::code`]. Anything above 0.5 is overhead; NaN is not.
    pub fn from_code(code: f32) -> Self {
        if code != 0.0 && code != 1.0 {
            debug!("view mode code {code} out of domain, clamped");
        }
        if code > 0.5 {
            ViewMode::FixedOverhead
        } else {
            ViewMode::ScrollDriven
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ViewMode::ScrollDriven => ViewMode::FixedOverhead,
            ViewMode::FixedOverhead => ViewMode::ScrollDriven,
        }
    }
}

/// Two-state view machine. Every transition is allowed, any number of times.
#[derive(Debug, Clone)]
pub struct ViewModeController {
    mode: ViewMode,
    overhead: CameraPose,
}

impl ViewModeController {
    /// Controller with the overhead camera at `height` above the origin.
    pub fn new(height: f32) -> Self {
        Self {
            mode: ViewMode::ScrollDriven,
            overhead: CameraPose::new(Vec3::new(0.0, height, 0.0), Vec3::ZERO),
        }
    }

    /// Height from config, or derived from the outermost orbit. A catalog
    /// with only the anchor falls back to a few anchor radii.
    pub fn for_registry(registry: &BodyRegistry, height: Option<f32>) -> Self {
        let height = height.unwrap_or_else(|| {
            let derived = OVERHEAD_HEIGHT_FACTOR * registry.outer_radius();
            derived.max(registry.anchor().visual_scale * 4.0)
        });
        Self::new(height)
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Flip the mode. Suspends or resumes the engine to match.
    pub fn toggle(&mut self, engine: &mut ChoreographyEngine) -> ViewMode {
        self.set_mode(self.mode.toggled(), engine);
        self.mode
    }

    /// Enter `mode`. Returns whether anything changed.
    pub fn set_mode(&mut self, mode: ViewMode, engine: &mut ChoreographyEngine) -> bool {
        if mode == self.mode {
            return false;
        }
        debug!("view mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        match mode {
            ViewMode::FixedOverhead => engine.suspend(),
            ViewMode::ScrollDriven => engine.resume(),
        }
        true
    }

    /// [`Self::set_mode`] from a wire code, clamped into the domain.
    pub fn set_mode_code(&mut self, code: f32, engine: &mut ChoreographyEngine) -> ViewMode {
        self.set_mode(ViewMode::from_code(code), engine);
        self.mode
    }

    pub fn overhead_pose(&self) -> CameraPose {
        self.overhead
    }

    /// Whether the page should stop the document from scrolling.
    pub fn scroll_locked(&self) -> bool {
        self.mode == ViewMode::FixedOverhead
    }

    /// Camera pose for this frame in the current mode.
    pub fn camera_pose(&self, engine: &mut ChoreographyEngine, dt: f32) -> Option<CameraPose> {
        match self.mode {
            ViewMode::ScrollDriven => engine.pose(dt),
            ViewMode::FixedOverhead if engine.is_torn_down() => None,
            ViewMode::FixedOverhead => Some(self.overhead),
        }
    }
}
