use crate::api::types::CameraPose;
use crate::choreography::keyframes::CameraKeyframe;
use crate::extensions::easing::{lerp_vec3, Easing};

/// Segment positions this close to an integer are treated as the boundary.
/// Absorbs the rounding of `i / (N - 1) * (N - 1)`.
pub const BOUNDARY_SNAP: f32 = 1e-5;

/// Camera pose for a scroll progress value.
///
/// Progress is clamped to [0, 1] (NaN reads as 0) and spread evenly over the
/// `N - 1` segments between keyframes. Within a segment the local parameter is
/// eased, then position and target are interpolated independently. The result
/// is exactly keyframe `i` at progress `i / (N - 1)`.
pub fn pose_at(progress: f32, keyframes: &[CameraKeyframe], easing: Easing) -> CameraPose {
    let n = keyframes.len();
    match n {
        0 => return CameraPose::default(),
        1 => return keyframes[0].pose(),
        _ => {}
    }

    let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
    let mut segment = progress * (n - 1) as f32;
    let nearest = segment.round();
    if (segment - nearest).abs() < BOUNDARY_SNAP {
        segment = nearest;
    }

    let index = (segment.floor() as usize).min(n - 2);
    let t = easing.apply(segment - index as f32);

    let from = keyframes[index].pose();
    let to = keyframes[index + 1].pose();
    CameraPose {
        position: lerp_vec3(from.position, to.position, t),
        look_at: lerp_vec3(from.look_at, to.look_at, t),
    }
}

/// Keyframes plus the easing used between them. Built once per scene.
#[derive(Debug, Clone)]
pub struct ScrollTimeline {
    keyframes: Vec<CameraKeyframe>,
    easing: Easing,
}

impl ScrollTimeline {
    pub fn new(keyframes: Vec<CameraKeyframe>, easing: Easing) -> Self {
        Self { keyframes, easing }
    }

    pub fn pose_at(&self, progress: f32) -> CameraPose {
        pose_at(progress, &self.keyframes, self.easing)
    }

    pub fn keyframes(&self) -> &[CameraKeyframe] {
        &self.keyframes
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Progress value at which the camera frames keyframe `index`.
    pub fn boundary(&self, index: usize) -> f32 {
        match self.keyframes.len() {
            0 | 1 => 0.0,
            n => index.min(n - 1) as f32 / (n - 1) as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::KeyframeTuning;
    use crate::bodies::body::CelestialBody;
    use crate::bodies::catalog::default_bodies;
    use crate::choreography::keyframes::build_keyframes;
    use glam::Vec3;

    fn keyframe(target: Vec3, offset: Vec3) -> CameraKeyframe {
        CameraKeyframe {
            body: String::new(),
            target,
            offset,
        }
    }

    fn timeline(easing: Easing) -> ScrollTimeline {
        let keyframes = build_keyframes(&default_bodies(), &KeyframeTuning::default());
        ScrollTimeline::new(keyframes, easing)
    }

    #[test]
    fn endpoints_are_exact() {
        let tl = timeline(Easing::QuadInOut);
        let first = tl.keyframes()[0].pose();
        let last = tl.keyframes()[tl.keyframes().len() - 1].pose();
        assert_eq!(tl.pose_at(0.0), first);
        assert_eq!(tl.pose_at(1.0), last);
    }

    #[test]
    fn every_boundary_is_exact() {
        for easing in [Easing::Linear, Easing::QuadInOut, Easing::SmoothStep] {
            let tl = timeline(easing);
            for (i, kf) in tl.keyframes().iter().enumerate() {
                assert_eq!(tl.pose_at(tl.boundary(i)), kf.pose(), "{easing:?} boundary {i}");
            }
        }
    }

    #[test]
    fn continuous_across_boundaries() {
        let tl = timeline(Easing::QuadInOut);
        let eps = 1e-4;
        for i in 1..tl.keyframes().len() - 1 {
            let b = tl.boundary(i);
            let before = tl.pose_at(b - eps);
            let after = tl.pose_at(b + eps);
            let at = tl.pose_at(b);
            assert!((before.position - at.position).length() < 1e-2, "left of {i}");
            assert!((after.position - at.position).length() < 1e-2, "right of {i}");
            assert!((before.look_at - after.look_at).length() < 2e-2, "target at {i}");
        }
    }

    #[test]
    fn out_of_range_is_clamped() {
        let tl = timeline(Easing::QuadInOut);
        assert_eq!(tl.pose_at(-0.5), tl.pose_at(0.0));
        assert_eq!(tl.pose_at(1.5), tl.pose_at(1.0));
    }

    #[test]
    fn nan_reads_as_start() {
        let tl = timeline(Easing::QuadInOut);
        assert_eq!(tl.pose_at(f32::NAN), tl.pose_at(0.0));
    }

    #[test]
    fn single_keyframe_is_constant() {
        let kf = keyframe(Vec3::ZERO, Vec3::new(0.0, 1.0, 5.0));
        let keyframes = vec![kf.clone()];
        for p in [0.0, 0.3, 1.0, 7.0] {
            assert_eq!(pose_at(p, &keyframes, Easing::QuadInOut), kf.pose());
        }
    }

    #[test]
    fn empty_timeline_yields_default_pose() {
        assert_eq!(pose_at(0.5, &[], Easing::Linear), CameraPose::default());
    }

    #[test]
    fn eased_midpoint_of_segment() {
        let keyframes = vec![
            keyframe(Vec3::ZERO, Vec3::Z),
            keyframe(Vec3::new(10.0, 0.0, 0.0), Vec3::Z),
        ];
        // QuadInOut(0.25) = 0.125.
        let pose = pose_at(0.25, &keyframes, Easing::QuadInOut);
        assert!((pose.look_at.x - 1.25).abs() < 1e-5);
        assert!((pose.position - Vec3::new(1.25, 0.0, 1.0)).length() < 1e-5);
        let linear = pose_at(0.25, &keyframes, Easing::Linear);
        assert!((linear.look_at.x - 2.5).abs() < 1e-5);
    }

    #[test]
    fn three_body_scenario() {
        let bodies = vec![
            CelestialBody::new("sun", 0.0, 2.0, "sun"),
            CelestialBody::new("a", 10.0, 0.5, "a"),
            CelestialBody::new("b", 20.0, 0.5, "b"),
        ];
        let keyframes = build_keyframes(&bodies, &KeyframeTuning::default());
        let tl = ScrollTimeline::new(keyframes, Easing::QuadInOut);

        assert_eq!(tl.pose_at(0.0).look_at, Vec3::ZERO);
        assert_eq!(tl.pose_at(0.5).look_at, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(tl.pose_at(1.0).look_at, Vec3::new(20.0, 0.0, 0.0));

        // Halfway through the second segment the target is halfway between a and b.
        let mid = tl.pose_at(0.75);
        assert!((mid.look_at - Vec3::new(15.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn boundary_helper() {
        let tl = timeline(Easing::Linear);
        let n = tl.keyframes().len();
        assert_eq!(tl.boundary(0), 0.0);
        assert_eq!(tl.boundary(n - 1), 1.0);
        assert_eq!(tl.boundary(n + 3), 1.0);
    }
}
