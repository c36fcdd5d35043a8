use serde::{Deserialize, Serialize};

use crate::api::error::{ConfigError, ConfigResult};
use crate::extensions::easing::Easing;
use crate::systems::starfield::StarDistribution;

/// Scene configuration, provided by the page.
/// Every field has a default so `{}` is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoyageConfig {
    /// Curve applied inside each keyframe segment.
    pub easing: Easing,
    /// Page scroll distance in px that maps onto progress 0..1 (default: 5000).
    pub scroll_distance: f32,
    /// Camera lag behind the scroll position, 0.0 = locked to scroll, 0.9 = very loose.
    pub scrub: f32,
    /// Longest frame delta fed to the clock, in seconds (default: 0.1).
    pub max_frame_dt: f32,
    /// Height of the overhead camera. `None` derives it from the outermost orbit.
    pub overhead_height: Option<f32>,
    /// Side light position relative to the camera.
    pub light_offset: [f32; 3],
    /// Twinkle angular rate shared by all stars (rad/s).
    pub twinkle_rate: f32,
    /// Seed for starfield generation.
    pub star_seed: u64,
    /// Starfield layers, drawn back to front.
    pub starfields: Vec<StarfieldConfig>,
    /// Camera offset heuristics for keyframe generation.
    pub keyframes: KeyframeTuning,
}

impl Default for VoyageConfig {
    fn default() -> Self {
        Self {
            easing: Easing::QuadInOut,
            scroll_distance: 5000.0,
            scrub: 0.0,
            max_frame_dt: 0.1,
            overhead_height: None,
            light_offset: [12.0, 6.0, 0.0],
            twinkle_rate: 1.5,
            star_seed: 0x5eed_cafe,
            starfields: vec![StarfieldConfig::background(), StarfieldConfig::band()],
            keyframes: KeyframeTuning::default(),
        }
    }
}

/// One procedurally generated star layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    pub radius: f32,
    pub distribution: StarDistribution,
    /// Min/max point size.
    pub size_range: [f32; 2],
    /// Min/max base opacity.
    pub opacity_range: [f32; 2],
}

impl StarfieldConfig {
    /// Distant full-sky layer.
    pub fn background() -> Self {
        Self {
            count: 4000,
            radius: 400.0,
            distribution: StarDistribution::Sphere,
            size_range: [0.6, 1.8],
            opacity_range: [0.4, 1.0],
        }
    }

    /// Dense galactic band.
    pub fn band() -> Self {
        Self {
            count: 6000,
            radius: 350.0,
            distribution: StarDistribution::band(),
            size_range: [0.3, 1.1],
            opacity_range: [0.25, 0.8],
        }
    }
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self::background()
    }
}

/// Tunables for the per-keyframe camera offset.
///
/// The first `early_count` keyframes approach from `early_offset`, which is
/// biased sideways so the camera does not cut through the anchor at the start
/// of the journey. Later keyframes share `late_offset`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyframeTuning {
    pub early_count: usize,
    /// Direction of the early offsets (normalized on use).
    pub early_offset: [f32; 3],
    /// Direction of the later offsets (normalized on use).
    pub late_offset: [f32; 3],
    /// Camera distance as a multiple of the body's visual radius.
    pub distance_factor: f32,
    /// Camera distance floor for small bodies.
    pub min_distance: f32,
    /// Keep the camera at least `visual_scale * clearance` from every body.
    pub clearance: f32,
}

impl Default for KeyframeTuning {
    fn default() -> Self {
        Self {
            early_count: 2,
            early_offset: [-0.8, 0.35, 1.0],
            late_offset: [0.0, 0.25, 1.0],
            distance_factor: 4.0,
            min_distance: 3.0,
            clearance: 1.2,
        }
    }
}

impl VoyageConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.scroll_distance.is_finite() && self.scroll_distance > 0.0) {
            return Err(ConfigError::invalid_parameter(
                "scroll_distance",
                format!("must be positive, got {}", self.scroll_distance),
            ));
        }
        if !(0.0..1.0).contains(&self.scrub) {
            return Err(ConfigError::invalid_parameter(
                "scrub",
                format!("must be in [0, 1), got {}", self.scrub),
            ));
        }
        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            return Err(ConfigError::invalid_parameter(
                "max_frame_dt",
                format!("must be positive, got {}", self.max_frame_dt),
            ));
        }
        if let Some(h) = self.overhead_height {
            if !(h.is_finite() && h > 0.0) {
                return Err(ConfigError::invalid_parameter(
                    "overhead_height",
                    format!("must be positive, got {h}"),
                ));
            }
        }
        if !self.light_offset.iter().all(|v| v.is_finite()) {
            return Err(ConfigError::invalid_parameter(
                "light_offset",
                format!("must be finite, got {:?}", self.light_offset),
            ));
        }
        if !self.twinkle_rate.is_finite() {
            return Err(ConfigError::invalid_parameter(
                "twinkle_rate",
                format!("must be finite, got {}", self.twinkle_rate),
            ));
        }
        for layer in &self.starfields {
            layer.validate()?;
        }
        self.keyframes.validate()
    }
}

/// `[min, max]` with finite ends and a finite span, as the sampler requires.
fn check_range(name: &'static str, range: [f32; 2]) -> ConfigResult<()> {
    let [min, max] = range;
    if !(min.is_finite() && max.is_finite() && (max - min).is_finite() && min <= max) {
        return Err(ConfigError::invalid_parameter(
            name,
            format!("must be a finite [min, max], got {range:?}"),
        ));
    }
    Ok(())
}

impl StarfieldConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::invalid_parameter(
                "starfields.radius",
                format!("must be positive, got {}", self.radius),
            ));
        }
        check_range("starfields.size_range", self.size_range)?;
        check_range("starfields.opacity_range", self.opacity_range)?;
        if let StarDistribution::Band(shape) = self.distribution {
            if !(shape.radial_exponent.is_finite() && shape.radial_exponent > 0.0) {
                return Err(ConfigError::invalid_parameter(
                    "starfields.radial_exponent",
                    format!("must be positive, got {}", shape.radial_exponent),
                ));
            }
            if !(shape.flatten.is_finite() && shape.jitter.is_finite()) {
                return Err(ConfigError::invalid_parameter(
                    "starfields.band",
                    "flatten and jitter must be finite",
                ));
            }
        }
        Ok(())
    }
}

impl KeyframeTuning {
    fn validate(&self) -> ConfigResult<()> {
        let finite = [self.distance_factor, self.min_distance, self.clearance]
            .into_iter()
            .chain(self.early_offset)
            .chain(self.late_offset)
            .all(f32::is_finite);
        if !finite {
            return Err(ConfigError::invalid_parameter(
                "keyframes",
                "offsets and distances must be finite",
            ));
        }
        if !(self.distance_factor > 0.0 && self.min_distance > 0.0 && self.clearance >= 1.0) {
            return Err(ConfigError::invalid_parameter(
                "keyframes",
                "distance_factor and min_distance must be positive, clearance >= 1",
            ));
        }
        Ok(())
    }
}
