use glam::Vec3;
use log::warn;

use crate::api::config::KeyframeTuning;
use crate::api::types::CameraPose;
use crate::bodies::body::CelestialBody;
use crate::systems::orbit::resting_position;

/// Outward growth of a blocked offset per step.
const PUSH_FACTOR: f32 = 1.25;
/// 1.25^16 ≈ 35, more than any sane catalog needs.
const MAX_PUSH_STEPS: usize = 16;

/// Camera placement for one body of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraKeyframe {
    /// Name of the body this keyframe frames.
    pub body: String,
    /// Resting position of the body. The camera looks here.
    pub target: Vec3,
    /// Camera position minus target.
    pub offset: Vec3,
}

impl CameraKeyframe {
    pub fn position(&self) -> Vec3 {
        self.target + self.offset
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position(), self.target)
    }
}

fn offset_direction(index: usize, tuning: &KeyframeTuning) -> Vec3 {
    let raw = if index < tuning.early_count {
        tuning.early_offset
    } else {
        tuning.late_offset
    };
    Vec3::from_array(raw).try_normalize().unwrap_or(Vec3::Z)
}

/// Whether `camera` is outside every body's keep-out sphere.
fn is_clear(camera: Vec3, bodies: &[CelestialBody], clearance: f32) -> bool {
    bodies
        .iter()
        .all(|b| camera.distance(resting_position(b)) >= b.visual_scale * clearance)
}

/// One keyframe per body, in visit order.
///
/// The camera sits `max(visual_scale · distance_factor, min_distance)` away
/// from its target. If that spot is inside any body (its own or a neighbour
/// that happens to be close at t = 0), the offset is stretched outward until
/// it is not.
pub fn build_keyframes(bodies: &[CelestialBody], tuning: &KeyframeTuning) -> Vec<CameraKeyframe> {
    bodies
        .iter()
        .enumerate()
        .map(|(i, body)| {
            let target = resting_position(body);
            let distance = (body.visual_scale * tuning.distance_factor).max(tuning.min_distance);
            let mut offset = offset_direction(i, tuning) * distance;

            let mut steps = 0;
            while !is_clear(target + offset, bodies, tuning.clearance) {
                if steps == MAX_PUSH_STEPS {
                    warn!(
                        "keyframe for {:?} still inside a body after {} steps, using it anyway",
                        body.name, steps
                    );
                    break;
                }
                offset *= PUSH_FACTOR;
                steps += 1;
            }

            CameraKeyframe {
                body: body.name.clone(),
                target,
                offset,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::catalog::default_bodies;

    fn three_bodies() -> Vec<CelestialBody> {
        vec![
            CelestialBody::new("sun", 0.0, 2.0, "sun"),
            CelestialBody::new("a", 10.0, 0.5, "a"),
            CelestialBody::new("b", 20.0, 0.5, "b"),
        ]
    }

    #[test]
    fn one_keyframe_per_body_in_order() {
        let bodies = default_bodies();
        let keyframes = build_keyframes(&bodies, &KeyframeTuning::default());
        assert_eq!(keyframes.len(), bodies.len());
        for (kf, body) in keyframes.iter().zip(&bodies) {
            assert_eq!(kf.body, body.name);
            assert_eq!(kf.target, resting_position(body));
        }
    }

    #[test]
    fn camera_never_starts_inside_a_body() {
        let bodies = default_bodies();
        let tuning = KeyframeTuning::default();
        for kf in build_keyframes(&bodies, &tuning) {
            for body in &bodies {
                let d = kf.position().distance(resting_position(body));
                assert!(
                    d >= body.visual_scale * tuning.clearance,
                    "{} camera is {d} from {}",
                    kf.body,
                    body.name
                );
            }
        }
    }

    #[test]
    fn offset_distance_scales_with_body() {
        let tuning = KeyframeTuning::default();
        let keyframes = build_keyframes(&three_bodies(), &tuning);
        // sun: 2 · 4 = 8; small bodies fall back to the floor.
        assert!((keyframes[0].offset.length() - 8.0).abs() < 1e-4);
        assert!((keyframes[2].offset.length() - tuning.min_distance).abs() < 1e-4);
    }

    #[test]
    fn early_keyframes_are_biased_sideways() {
        let keyframes = build_keyframes(&three_bodies(), &KeyframeTuning::default());
        assert!(keyframes[0].offset.x < 0.0);
        assert!(keyframes[1].offset.x < 0.0);
        assert_eq!(keyframes[2].offset.x, 0.0);
        assert!(keyframes.iter().all(|kf| kf.offset.y > 0.0));
    }

    #[test]
    fn blocked_offset_is_pushed_out() {
        // "moon" sits right next to where the late offset puts rock's camera.
        let bodies = vec![
            CelestialBody::new("sun", 0.0, 1.0, "sun"),
            CelestialBody::new("rock", 10.0, 0.2, "rock"),
            CelestialBody::new("moon", 12.0, 2.0, "moon"),
        ];
        let tuning = KeyframeTuning {
            early_count: 0,
            late_offset: [1.0, 0.0, 0.0],
            ..KeyframeTuning::default()
        };
        let keyframes = build_keyframes(&bodies, &tuning);
        let rock = &keyframes[1];
        assert!(rock.offset.length() > tuning.min_distance);
        assert!(rock.position().distance(resting_position(&bodies[2])) >= 2.0 * tuning.clearance);
    }

    #[test]
    fn degenerate_direction_falls_back_to_z() {
        let tuning = KeyframeTuning {
            early_count: 0,
            late_offset: [0.0, 0.0, 0.0],
            ..KeyframeTuning::default()
        };
        let keyframes = build_keyframes(&three_bodies(), &tuning);
        assert!(keyframes[2].offset.x == 0.0 && keyframes[2].offset.z > 0.0);
    }

    #[test]
    fn pose_looks_at_target() {
        let keyframes = build_keyframes(&three_bodies(), &KeyframeTuning::default());
        let pose = keyframes[1].pose();
        assert_eq!(pose.look_at, keyframes[1].target);
        assert_eq!(pose.position, keyframes[1].target + keyframes[1].offset);
    }
}
