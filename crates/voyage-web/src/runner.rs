use voyage_engine::bodies::catalog::default_bodies;
use voyage_engine::{
    BodyRegistry, ConfigResult, FrameBuffer, FrameLayout, Scene, ScrollBinding, TextureHandle,
    TextureManifest, TextureRegistry, ViewMode, VoyageConfig,
};
use voyage_engine::assets::manifest::TextureKind;

/// Owns one scene plus the buffers the page reads.
///
/// The page keeps a single `SceneRunner` in a `thread_local!` and talks to it
/// through the free functions in `lib.rs`, because wasm-bindgen cannot hand
/// out borrows across calls.
pub struct SceneRunner {
    scene: Scene,
    binding: ScrollBinding,
    textures: TextureRegistry,
    frame: FrameBuffer,
    /// Scroll lock currently applied to the document.
    applied_lock: bool,
}

/// Empty input means "use the default".
fn non_empty(json: &str) -> Option<&str> {
    let trimmed = json.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

impl SceneRunner {
    /// Parse every input, build the scene and acquire the scroll binding.
    /// `star_seed` overrides the configured seed (the page passes a random one).
    pub fn new(
        config_json: &str,
        catalog_json: &str,
        manifest_json: &str,
        star_seed: Option<u64>,
    ) -> ConfigResult<Self> {
        let mut config = match non_empty(config_json) {
            Some(json) => VoyageConfig::from_json(json)?,
            None => VoyageConfig::default(),
        };
        if let Some(seed) = star_seed {
            config.star_seed = seed;
        }
        let registry = match non_empty(catalog_json) {
            Some(json) => BodyRegistry::from_json(json)?,
            None => BodyRegistry::new(default_bodies())?,
        };
        let manifest = match non_empty(manifest_json) {
            Some(json) => TextureManifest::from_json(json)?,
            None => TextureManifest::default(),
        };
        let textures = TextureRegistry::from_manifest(&manifest);

        let twinkle_rate = config.twinkle_rate;
        let mut scene = Scene::new(config, registry, &textures)?;
        let binding = scene.start();
        let layout = FrameLayout::new(scene.registry().len(), scene.starfield().star_count());
        let mut frame = FrameBuffer::new(layout, twinkle_rate);
        frame.write(scene.output());

        Ok(Self {
            scene,
            binding,
            textures,
            frame,
            applied_lock: false,
        })
    }

    /// Run one frame. Returns false once torn down.
    pub fn tick(&mut self, dt: f32) -> bool {
        match self.scene.tick(dt) {
            Some(output) => {
                self.frame.write(output);
                true
            }
            None => false,
        }
    }

    pub fn set_progress(&self, progress: f32) -> bool {
        self.binding.set_progress(progress)
    }

    pub fn set_scroll_offset(&self, offset: f32) -> bool {
        self.binding.set_scroll_offset(offset)
    }

    /// Returns the new view mode code.
    pub fn toggle_view(&mut self) -> f32 {
        self.scene.toggle_view().code()
    }

    pub fn set_view(&mut self, code: f32) -> f32 {
        self.scene.set_view_mode_code(code).code()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.scene.view_mode()
    }

    pub fn teardown(&mut self) -> bool {
        self.scene.teardown()
    }

    /// New document scroll lock state, if it differs from what was last
    /// applied.
    pub fn take_lock_change(&mut self) -> Option<bool> {
        let wanted = self.scene.scroll_locked();
        if wanted == self.applied_lock {
            return None;
        }
        self.applied_lock = wanted;
        Some(wanted)
    }

    // ---- Pointer accessors for zero-copy reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.frame.len() as u32
    }

    pub fn stars_ptr(&self) -> *const f32 {
        self.scene.starfield().as_floats().as_ptr()
    }

    pub fn stars_len(&self) -> u32 {
        self.scene.starfield().as_floats().len() as u32
    }

    pub fn star_count(&self) -> u32 {
        self.scene.starfield().star_count() as u32
    }

    // ---- Texture load list ----

    pub fn texture_count(&self) -> u32 {
        self.textures.len() as u32
    }

    pub fn texture_path(&self, handle: u32) -> Option<String> {
        self.textures
            .entries()
            .into_iter()
            .find(|e| e.handle == TextureHandle(handle))
            .map(|e| e.path.clone())
    }

    /// 0 = surface, 1 = emissive, 2 = ring.
    pub fn texture_kind(&self, handle: u32) -> Option<u32> {
        self.textures
            .entries()
            .into_iter()
            .find(|e| e.handle == TextureHandle(handle))
            .map(|e| match e.kind {
                TextureKind::Surface => 0,
                TextureKind::Emissive => 1,
                TextureKind::Ring => 2,
            })
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}
