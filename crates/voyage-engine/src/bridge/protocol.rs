//! Frame buffer layout shared with the JavaScript renderer.
//! Must stay in sync with the renderer's `protocol.ts`.
//!
//! Layout (all values f32 / 4 bytes):
//! ```text
//! [Header: 16 floats]
//! [Camera: 6 floats]        position xyz, look_at xyz
//! [Up hint: 3 floats]
//! [Light: 3 floats]         side light position
//! [Bodies: body_count × 12 floats]
//! ```
//!
//! Stars are uploaded once from a separate buffer of `StarVertex`es; only
//! their count travels in the header.

use bytemuck::{Pod, Zeroable};

use crate::core::scene::FrameOutput;
use crate::systems::orbit::BodyTransform;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_VIEW_MODE: usize = 2;
pub const HEADER_SCROLL_LOCKED: usize = 3;
pub const HEADER_TIME: usize = 4;
pub const HEADER_PROGRESS: usize = 5;
pub const HEADER_BODY_COUNT: usize = 6;
pub const HEADER_STAR_COUNT: usize = 7;
pub const HEADER_TWINKLE_RATE: usize = 8;
// 9..16 reserved.

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

pub const CAMERA_FLOATS: usize = 6;
pub const UP_FLOATS: usize = 3;
pub const LIGHT_FLOATS: usize = 3;

/// Floats per body record (wire format, never changes).
pub const BODY_FLOATS: usize = 12;

/// Body flag bits.
pub const BODY_FLAG_RING: u32 = 1;
pub const BODY_FLAG_EMISSIVE: u32 = 1 << 1;

/// Per-body record.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct BodyInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Mesh rotation quaternion (tilt · spin).
    pub qx: f32,
    pub qy: f32,
    pub qz: f32,
    pub qw: f32,
    pub scale: f32,
    pub orbit_angle: f32,
    pub texture: f32,
    pub flags: f32,
    pub _pad: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = BODY_FLOATS;

    pub fn from_transform(t: &BodyTransform) -> Self {
        let mut flags = 0;
        if t.has_ring {
            flags |= BODY_FLAG_RING;
        }
        if t.emissive {
            flags |= BODY_FLAG_EMISSIVE;
        }
        Self {
            x: t.position.x,
            y: t.position.y,
            z: t.position.z,
            qx: t.rotation.x,
            qy: t.rotation.y,
            qz: t.rotation.z,
            qw: t.rotation.w,
            scale: t.scale,
            orbit_angle: t.orbit_angle,
            texture: t.texture.0 as f32,
            flags: flags as f32,
            _pad: 0.0,
        }
    }
}

/// Offsets of every section, computed once per scene.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayout {
    pub body_count: usize,
    pub star_count: usize,

    /// Offset (in floats) where each section begins.
    pub camera_offset: usize,
    pub up_offset: usize,
    pub light_offset: usize,
    pub body_data_offset: usize,

    /// Size of body data section in floats.
    pub body_data_floats: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl FrameLayout {
    pub fn new(body_count: usize, star_count: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let up_offset = camera_offset + CAMERA_FLOATS;
        let light_offset = up_offset + UP_FLOATS;
        let body_data_offset = light_offset + LIGHT_FLOATS;
        let body_data_floats = body_count * BODY_FLOATS;
        let buffer_total_floats = body_data_offset + body_data_floats;

        Self {
            body_count,
            star_count,
            camera_offset,
            up_offset,
            light_offset,
            body_data_offset,
            body_data_floats,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }
}

/// Flat buffer the renderer reads each frame.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    layout: FrameLayout,
    data: Vec<f32>,
}

impl FrameBuffer {
    /// Zeroed buffer with the static header fields filled in.
    pub fn new(layout: FrameLayout, twinkle_rate: f32) -> Self {
        let mut data = vec![0.0; layout.buffer_total_floats];
        data[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        data[HEADER_BODY_COUNT] = layout.body_count as f32;
        data[HEADER_STAR_COUNT] = layout.star_count as f32;
        data[HEADER_TWINKLE_RATE] = twinkle_rate;
        Self { layout, data }
    }

    /// Serialize one frame. Bodies beyond the layout's count are dropped.
    pub fn write(&mut self, frame: &FrameOutput) {
        let d = &mut self.data;
        d[HEADER_FRAME_COUNTER] = frame.frame as f32;
        d[HEADER_VIEW_MODE] = frame.view_mode.code();
        d[HEADER_SCROLL_LOCKED] = if frame.scroll_locked { 1.0 } else { 0.0 };
        d[HEADER_TIME] = frame.time;
        d[HEADER_PROGRESS] = frame.progress;

        let l = &self.layout;
        d[l.camera_offset..l.camera_offset + 3].copy_from_slice(&frame.camera.position.to_array());
        d[l.camera_offset + 3..l.up_offset].copy_from_slice(&frame.camera.look_at.to_array());
        d[l.up_offset..l.light_offset].copy_from_slice(&frame.up.to_array());
        d[l.light_offset..l.body_data_offset].copy_from_slice(&frame.light_position.to_array());

        let bodies = &mut d[l.body_data_offset..];
        for (slot, body) in bodies.chunks_exact_mut(BODY_FLOATS).zip(&frame.bodies) {
            let instance = BodyInstance::from_transform(body);
            slot.copy_from_slice(bytemuck::cast_slice(std::slice::from_ref(&instance)));
        }
    }

    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Raw pointer for zero-copy reads from wasm memory.
    pub fn as_ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{CameraPose, TextureHandle};
    use crate::choreography::view_mode::ViewMode;
    use glam::{Quat, Vec3};

    fn body(x: f32, ring: bool) -> BodyTransform {
        BodyTransform {
            position: Vec3::new(x, 1.0, 2.0),
            rotation: Quat::IDENTITY,
            scale: 0.5,
            orbit_angle: 0.25,
            texture: TextureHandle(4),
            has_ring: ring,
            emissive: false,
        }
    }

    fn frame(bodies: Vec<BodyTransform>) -> FrameOutput {
        FrameOutput {
            frame: 7,
            time: 1.5,
            progress: 0.5,
            view_mode: ViewMode::FixedOverhead,
            scroll_locked: true,
            camera: CameraPose::new(Vec3::new(0.0, 32.0, 0.0), Vec3::ZERO),
            up: Vec3::NEG_Z,
            light_position: Vec3::new(12.0, 38.0, 0.0),
            bodies,
        }
    }

    #[test]
    fn body_instance_is_12_floats() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), BODY_FLOATS * 4);
        assert_eq!(BodyInstance::FLOATS, 12);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = FrameLayout::new(9, 10_000);
        assert_eq!(layout.camera_offset, HEADER_FLOATS);
        assert_eq!(layout.up_offset, layout.camera_offset + CAMERA_FLOATS);
        assert_eq!(layout.light_offset, layout.up_offset + UP_FLOATS);
        assert_eq!(layout.body_data_offset, layout.light_offset + LIGHT_FLOATS);
        assert_eq!(layout.buffer_total_floats, 28 + 9 * BODY_FLOATS);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn static_header_fields() {
        let buf = FrameBuffer::new(FrameLayout::new(2, 300), 1.5);
        let d = buf.as_slice();
        assert_eq!(d[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(d[HEADER_BODY_COUNT], 2.0);
        assert_eq!(d[HEADER_STAR_COUNT], 300.0);
        assert_eq!(d[HEADER_TWINKLE_RATE], 1.5);
        assert_eq!(buf.len(), buf.layout().buffer_total_floats);
    }

    #[test]
    fn writes_frame() {
        let mut buf = FrameBuffer::new(FrameLayout::new(2, 0), 1.0);
        buf.write(&frame(vec![body(10.0, false), body(20.0, true)]));
        let d = buf.as_slice();
        let l = buf.layout().clone();

        assert_eq!(d[HEADER_FRAME_COUNTER], 7.0);
        assert_eq!(d[HEADER_VIEW_MODE], 1.0);
        assert_eq!(d[HEADER_SCROLL_LOCKED], 1.0);
        assert_eq!(d[HEADER_PROGRESS], 0.5);
        assert_eq!(&d[l.camera_offset..l.up_offset], &[0.0, 32.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(&d[l.up_offset..l.light_offset], &[0.0, 0.0, -1.0]);
        assert_eq!(&d[l.light_offset..l.body_data_offset], &[12.0, 38.0, 0.0]);

        let second = &d[l.body_data_offset + BODY_FLOATS..];
        assert_eq!(&second[..3], &[20.0, 1.0, 2.0]);
        assert_eq!(&second[3..7], &[0.0, 0.0, 0.0, 1.0]);
        assert_eq!(second[7], 0.5);
        assert_eq!(second[9], 4.0);
        assert_eq!(second[10], BODY_FLAG_RING as f32);
    }

    #[test]
    fn extra_bodies_are_dropped() {
        let mut buf = FrameBuffer::new(FrameLayout::new(1, 0), 1.0);
        buf.write(&frame(vec![body(10.0, false), body(20.0, false)]));
        assert_eq!(buf.len(), HEADER_FLOATS + 12 + BODY_FLOATS);
        assert_eq!(buf.as_slice()[buf.layout().body_data_offset], 10.0);
    }
}
