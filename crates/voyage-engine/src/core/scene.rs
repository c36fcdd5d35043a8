use glam::Vec3;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::api::config::VoyageConfig;
use crate::api::error::ConfigResult;
use crate::api::types::{CameraPose, TextureHandle};
use crate::assets::registry::TextureSource;
use crate::bodies::registry::BodyRegistry;
use crate::choreography::engine::ChoreographyEngine;
use crate::choreography::keyframes::build_keyframes;
use crate::choreography::timeline::ScrollTimeline;
use crate::choreography::view_mode::{ViewMode, ViewModeController};
use crate::core::time::FrameClock;
use crate::input::scroll::{ScrollBinding, ScrollTracker};
use crate::systems::lighting::SideLight;
use crate::systems::orbit::{BodyTransform, OrbitSimulator, OrbitState};
use crate::systems::starfield::Starfield;

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    pub frame: u64,
    /// Shared time uniform (seconds) for star twinkle.
    pub time: f32,
    /// Progress the camera is showing.
    pub progress: f32,
    pub view_mode: ViewMode,
    pub scroll_locked: bool,
    pub camera: CameraPose,
    pub up: Vec3,
    pub light_position: Vec3,
    /// Index-aligned with the catalog.
    pub bodies: Vec<BodyTransform>,
}

/// One running star-system scene.
///
/// Owns the catalog, the camera choreography, the view mode and the frame
/// clock. Built once, ticked once per animation frame, torn down once.
pub struct Scene {
    registry: BodyRegistry,
    textures: Vec<TextureHandle>,
    engine: ChoreographyEngine,
    view: ViewModeController,
    light: SideLight,
    starfield: Starfield,
    clock: FrameClock,
    orbits: OrbitSimulator,
    states: Vec<OrbitState>,
    output: FrameOutput,
    torn_down: bool,
}

impl Scene {
    /// Validate `config` and assemble every subsystem. Missing textures are
    /// not an error; those bodies draw with the placeholder.
    pub fn new(
        config: VoyageConfig,
        registry: BodyRegistry,
        textures: &impl TextureSource,
    ) -> ConfigResult<Self> {
        config.validate()?;

        let bodies = registry.list_bodies();
        let count = bodies.len();
        let keyframes = build_keyframes(bodies, &config.keyframes);
        let timeline = ScrollTimeline::new(keyframes, config.easing);
        let engine = ChoreographyEngine::new(timeline, ScrollTracker::new(config.scroll_distance))
            .with_scrub(config.scrub);
        let view = ViewModeController::for_registry(&registry, config.overhead_height);

        let mut rng = StdRng::seed_from_u64(config.star_seed);
        let starfield = Starfield::generate(&config.starfields, &mut rng);

        let handles = bodies
            .iter()
            .map(|b| textures.resolve_or_placeholder(&b.texture))
            .collect();

        info!(
            "scene built: {} bodies, {} star layers, {} stars",
            count,
            starfield.layers().len(),
            starfield.star_count()
        );

        let light = SideLight::new(Vec3::from_array(config.light_offset));
        let mut output = FrameOutput {
            camera: engine.current_pose(),
            bodies: Vec::with_capacity(count),
            ..FrameOutput::default()
        };
        output.up = output.camera.up_hint();
        output.light_position = output.camera.position + light.offset;

        Ok(Self {
            states: Vec::with_capacity(count),
            registry,
            textures: handles,
            engine,
            view,
            light,
            starfield,
            clock: FrameClock::new(config.max_frame_dt),
            orbits: OrbitSimulator::new(),
            output,
            torn_down: false,
        })
    }

    /// Acquire the scroll binding for the page.
    pub fn start(&mut self) -> ScrollBinding {
        debug!("scene started");
        self.engine.attach()
    }

    /// Advance one frame. `None` once torn down.
    pub fn tick(&mut self, dt: f32) -> Option<&FrameOutput> {
        if self.torn_down {
            return None;
        }
        let before = self.clock.elapsed();
        let elapsed = self.clock.advance(dt);
        let step = (elapsed - before) as f32;

        let bodies = self.registry.list_bodies();
        self.orbits.advance_into(bodies, elapsed, &mut self.states);
        self.output.bodies.clear();
        self.output.bodies.extend(
            self.states
                .iter()
                .zip(bodies)
                .zip(&self.textures)
                .map(|((state, body), &texture)| state.transform(body, texture)),
        );

        // Before `start` there is no scroll signal yet; hold the first pose.
        let camera = self
            .view
            .camera_pose(&mut self.engine, step)
            .unwrap_or_else(|| self.engine.current_pose());

        self.output.frame = self.clock.frames();
        self.output.time = self.clock.uniform();
        self.output.progress = self.engine.progress();
        self.output.view_mode = self.view.mode();
        self.output.scroll_locked = self.view.scroll_locked();
        self.output.camera = camera;
        self.output.up = camera.up_hint();
        self.output.light_position = self.light.track(&camera);
        Some(&self.output)
    }

    /// Flip between scroll-driven and overhead views.
    pub fn toggle_view(&mut self) -> ViewMode {
        self.view.toggle(&mut self.engine)
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> bool {
        self.view.set_mode(mode, &mut self.engine)
    }

    /// Set the view from a wire code; out-of-domain codes are clamped.
    pub fn set_view_mode_code(&mut self, code: f32) -> ViewMode {
        self.view.set_mode_code(code, &mut self.engine)
    }

    /// Release the scroll binding and unlock scrolling. Safe to call twice;
    /// returns whether this call did the work.
    pub fn teardown(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.view.set_mode(ViewMode::ScrollDriven, &mut self.engine);
        self.engine.teardown();
        self.output.scroll_locked = false;
        self.output.view_mode = ViewMode::ScrollDriven;
        self.torn_down = true;
        info!("scene torn down after {} frames", self.clock.frames());
        true
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Last published frame.
    pub fn output(&self) -> &FrameOutput {
        &self.output
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    /// Resolved texture per body, index-aligned with the catalog.
    pub fn textures(&self) -> &[TextureHandle] {
        &self.textures
    }

    pub fn engine(&self) -> &ChoreographyEngine {
        &self.engine
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view.mode()
    }

    pub fn scroll_locked(&self) -> bool {
        !self.torn_down && self.view.scroll_locked()
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        self.teardown();
    }
}
