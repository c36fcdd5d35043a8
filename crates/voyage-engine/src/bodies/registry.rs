use std::collections::HashSet;

use crate::api::error::{ConfigError, ConfigResult};
use crate::bodies::body::CelestialBody;

/// Validated, immutable catalog of bodies in visit order.
///
/// The first body is the anchor (orbit radius 0). Every later body orbits
/// strictly further out than the one before it, which is what makes catalog
/// order the camera's visit order.
#[derive(Debug, Clone)]
pub struct BodyRegistry {
    bodies: Vec<CelestialBody>,
}

impl BodyRegistry {
    /// Validate a catalog. Any violation is fatal: the scene must not start.
    pub fn new(bodies: Vec<CelestialBody>) -> ConfigResult<Self> {
        validate(&bodies)?;
        Ok(Self { bodies })
    }

    /// Parse a JSON array of bodies and validate it.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let bodies: Vec<CelestialBody> = serde_json::from_str(json)?;
        Self::new(bodies)
    }

    /// All bodies in visit order.
    pub fn list_bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    /// The central body.
    pub fn anchor(&self) -> &CelestialBody {
        &self.bodies[0]
    }

    /// Look up a body by name.
    pub fn get(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// Visit-order index of a body.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.name == name)
    }

    /// Radius of the outermost orbit.
    pub fn outer_radius(&self) -> f32 {
        self.bodies.last().map(|b| b.orbit_radius).unwrap_or(0.0)
    }

    /// Number of bodies. Never zero.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

fn validate(bodies: &[CelestialBody]) -> ConfigResult<()> {
    let Some(anchor) = bodies.first() else {
        return Err(ConfigError::EmptyCatalog);
    };
    if !anchor.is_anchor() {
        return Err(ConfigError::MissingAnchor {
            name: anchor.name.clone(),
            radius: anchor.orbit_radius,
        });
    }

    let mut names = HashSet::with_capacity(bodies.len());
    let mut previous = 0.0_f32;
    for (i, body) in bodies.iter().enumerate() {
        if !names.insert(body.name.as_str()) {
            return Err(ConfigError::DuplicateName(body.name.clone()));
        }
        check_parameters(body)?;
        if i == 0 {
            continue;
        }
        if body.is_anchor() {
            return Err(ConfigError::ExtraAnchor {
                name: body.name.clone(),
            });
        }
        if body.orbit_radius <= previous {
            return Err(ConfigError::NonMonotonicRadius {
                name: body.name.clone(),
                radius: body.orbit_radius,
                previous,
            });
        }
        previous = body.orbit_radius;
    }
    Ok(())
}

fn check_parameters(body: &CelestialBody) -> ConfigResult<()> {
    let finite = [
        body.orbit_radius,
        body.start_angle,
        body.orbit_speed,
        body.axial_tilt,
        body.vertical_offset,
        body.visual_scale,
        body.spin_speed,
    ]
    .iter()
    .all(|v| v.is_finite());
    if !finite {
        return Err(ConfigError::invalid_body(&body.name, "parameters must be finite"));
    }
    if body.orbit_radius < 0.0 {
        return Err(ConfigError::invalid_body(&body.name, "orbit_radius must be >= 0"));
    }
    if body.visual_scale <= 0.0 {
        return Err(ConfigError::invalid_body(&body.name, "visual_scale must be > 0"));
    }
    if body.name.is_empty() {
        return Err(ConfigError::invalid_body(&body.name, "name must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sun() -> CelestialBody {
        CelestialBody::new("sun", 0.0, 5.0, "sun")
    }

    #[test]
    fn accepts_ordered_catalog() {
        let reg = BodyRegistry::new(vec![
            sun(),
            CelestialBody::new("a", 10.0, 1.0, "a"),
            CelestialBody::new("b", 20.0, 1.0, "b"),
        ])
        .unwrap();
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.anchor().name, "sun");
        assert_eq!(reg.index_of("b"), Some(2));
        assert_eq!(reg.outer_radius(), 20.0);
        assert_eq!(reg.get("a").unwrap().orbit_radius, 10.0);
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(BodyRegistry::new(vec![]), Err(ConfigError::EmptyCatalog)));
    }

    #[test]
    fn rejects_duplicate_name() {
        let err = BodyRegistry::new(vec![
            sun(),
            CelestialBody::new("a", 10.0, 1.0, "a"),
            CelestialBody::new("a", 20.0, 1.0, "a"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName(ref n) if n == "a"));
    }

    #[test]
    fn rejects_non_monotonic_radius() {
        let err = BodyRegistry::new(vec![
            sun(),
            CelestialBody::new("a", 20.0, 1.0, "a"),
            CelestialBody::new("b", 20.0, 1.0, "b"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::NonMonotonicRadius { ref name, .. } if name == "b"));
    }

    #[test]
    fn rejects_catalog_without_anchor_first() {
        let err = BodyRegistry::new(vec![
            CelestialBody::new("a", 10.0, 1.0, "a"),
            sun(),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingAnchor { .. }));
    }

    #[test]
    fn rejects_second_anchor() {
        let err = BodyRegistry::new(vec![sun(), CelestialBody::new("twin", 0.0, 1.0, "t")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::ExtraAnchor { .. }));
    }

    #[test]
    fn rejects_non_positive_scale() {
        let err = BodyRegistry::new(vec![sun(), CelestialBody::new("a", 10.0, 0.0, "a")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBody { .. }));
    }

    #[test]
    fn rejects_nan_parameters() {
        let bad = CelestialBody::new("a", 10.0, 1.0, "a").with_orbit(f32::NAN, 0.1);
        assert!(BodyRegistry::new(vec![sun(), bad]).is_err());
    }

    #[test]
    fn loads_from_json() {
        let json = r#"[
            { "name": "sun", "orbit_radius": 0.0, "visual_scale": 5.0, "texture": "sun",
              "emissive_color": [1.0, 0.8, 0.4] },
            { "name": "rock", "orbit_radius": 12.0, "visual_scale": 0.6, "texture": "rock",
              "orbit_speed": 0.1 }
        ]"#;
        let reg = BodyRegistry::from_json(json).unwrap();
        assert_eq!(reg.len(), 2);
        assert!(reg.anchor().is_emissive());
    }

    #[test]
    fn json_with_bad_order_is_rejected() {
        let json = r#"[
            { "name": "sun", "orbit_radius": 0.0, "visual_scale": 5.0, "texture": "sun" },
            { "name": "b", "orbit_radius": 20.0, "visual_scale": 1.0, "texture": "b" },
            { "name": "a", "orbit_radius": 10.0, "visual_scale": 1.0, "texture": "a" }
        ]"#;
        assert!(BodyRegistry::from_json(json).is_err());
    }
}
