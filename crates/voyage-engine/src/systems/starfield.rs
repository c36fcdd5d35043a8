//! Procedural starfield.
//!
//! Points are generated once and never mutated. The renderer animates them
//! with a single shared time uniform: each point's brightness oscillates as
//! `opacity · (0.6 + 0.4 · sin(time · rate + phase))`, see [`twinkle`].

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::api::config::StarfieldConfig;

/// Shape parameters of the galactic band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandShape {
    /// Vertical squash applied to the sampled point (1.0 = sphere).
    pub flatten: f32,
    /// Uniform vertical jitter, as a fraction of the radius.
    pub jitter: f32,
    /// Radius is `R · U^radial_exponent`. 1/3 would be volumetric.
    pub radial_exponent: f32,
}

impl Default for BandShape {
    fn default() -> Self {
        Self {
            flatten: 0.12,
            jitter: 0.02,
            radial_exponent: 0.5,
        }
    }
}

/// How star positions are sampled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarDistribution {
    /// Uniform in the volume of a ball.
    Sphere,
    /// Flattened toward the equatorial plane.
    Band(BandShape),
}

impl StarDistribution {
    /// Band with default shape.
    pub fn band() -> Self {
        StarDistribution::Band(BandShape::default())
    }
}

/// One generated star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarPoint {
    pub position: Vec3,
    pub size: f32,
    /// Twinkle phase offset in [0, 2π).
    pub phase: f32,
    /// Base opacity before twinkle.
    pub opacity: f32,
}

impl StarPoint {
    /// Brightness at `time` for a shared twinkle `rate`.
    pub fn brightness(&self, time: f32, rate: f32) -> f32 {
        twinkle(self.opacity, time, rate, self.phase)
    }
}

/// Shared twinkle curve. Stays within `[0.2 · base, base]`.
#[inline]
pub fn twinkle(base: f32, time: f32, rate: f32, phase: f32) -> f32 {
    base * (0.6 + 0.4 * (time * rate + phase).sin())
}

/// Uniformly distributed unit vector.
fn random_direction<R: Rng>(rng: &mut R) -> Vec3 {
    let cos_theta: f32 = rng.gen_range(-1.0..=1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi: f32 = rng.gen_range(0.0..TAU);
    Vec3::new(sin_theta * phi.cos(), cos_theta, sin_theta * phi.sin())
}

/// Sample one position for the given distribution.
fn sample_position<R: Rng>(rng: &mut R, radius: f32, distribution: StarDistribution) -> Vec3 {
    let dir = random_direction(rng);
    let u: f32 = rng.gen_range(0.0..=1.0);
    match distribution {
        StarDistribution::Sphere => dir * radius * u.cbrt(),
        StarDistribution::Band(shape) => {
            let mut p = dir * radius * u.powf(shape.radial_exponent);
            let jitter = shape.jitter * radius;
            p.y = p.y * shape.flatten + rng.gen_range(-1.0_f32..=1.0) * jitter;
            // Jitter can push a point just past the shell; pull it back in.
            let len = p.length();
            if len > radius {
                p *= radius / len;
            }
            p
        }
    }
}

fn sample_range<R: Rng>(rng: &mut R, range: [f32; 2]) -> f32 {
    if range[1] > range[0] {
        rng.gen_range(range[0]..range[1])
    } else {
        range[0]
    }
}

/// Generate `count` stars inside `radius` with default size/opacity ranges.
pub fn generate<R: Rng>(
    count: usize,
    radius: f32,
    distribution: StarDistribution,
    rng: &mut R,
) -> Vec<StarPoint> {
    let config = StarfieldConfig {
        count,
        radius,
        distribution,
        ..StarfieldConfig::default()
    };
    generate_layer(&config, rng)
}

/// Generate a configured layer.
pub fn generate_layer<R: Rng>(config: &StarfieldConfig, rng: &mut R) -> Vec<StarPoint> {
    (0..config.count)
        .map(|_| StarPoint {
            position: sample_position(rng, config.radius, config.distribution),
            size: sample_range(rng, config.size_range),
            phase: rng.gen_range(0.0..TAU),
            opacity: sample_range(rng, config.opacity_range),
        })
        .collect()
}

/// GPU-side star vertex. Must match the renderer's point attribute layout:
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct StarVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub size: f32,
    pub phase: f32,
    pub opacity: f32,
    /// Index of the layer this star belongs to.
    pub layer: f32,
    pub _pad: f32,
}

impl StarVertex {
    pub const FLOATS: usize = 8;
}

/// All star layers of a scene, flattened for upload.
#[derive(Debug, Default)]
pub struct Starfield {
    vertices: Vec<StarVertex>,
    /// `(start, len)` into `vertices` per layer.
    layers: Vec<(usize, usize)>,
}

impl Starfield {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate every configured layer.
    pub fn generate<R: Rng>(layers: &[StarfieldConfig], rng: &mut R) -> Self {
        let mut field = Self::new();
        for config in layers {
            let points = generate_layer(config, rng);
            field.push_layer(&points);
        }
        field
    }

    /// Append a layer of points.
    pub fn push_layer(&mut self, points: &[StarPoint]) {
        let layer = self.layers.len() as f32;
        let start = self.vertices.len();
        self.vertices.extend(points.iter().map(|p| StarVertex {
            x: p.position.x,
            y: p.position.y,
            z: p.position.z,
            size: p.size,
            phase: p.phase,
            opacity: p.opacity,
            layer,
            _pad: 0.0,
        }));
        self.layers.push((start, points.len()));
    }

    pub fn vertices(&self) -> &[StarVertex] {
        &self.vertices
    }

    /// Flat float view for upload.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// `(start, len)` of each layer in [`Self::vertices`].
    pub fn layers(&self) -> &[(usize, usize)] {
        &self.layers
    }

    pub fn star_count(&self) -> usize {
        self.vertices.len()
    }
}
