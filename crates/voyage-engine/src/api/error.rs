//! Startup errors. Anything in here prevents a scene from being built.

use thiserror::Error;

/// Result type for catalog and configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A malformed catalog or configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("catalog is empty")]
    EmptyCatalog,

    #[error("duplicate body name: {0}")]
    DuplicateName(String),

    #[error("first body {name:?} must be the anchor (orbit_radius 0), found {radius}")]
    MissingAnchor { name: String, radius: f32 },

    #[error("body {name:?} has orbit_radius 0 but only the first body may be the anchor")]
    ExtraAnchor { name: String },

    #[error("body {name:?} orbit_radius {radius} must exceed previous radius {previous}")]
    NonMonotonicRadius {
        name: String,
        radius: f32,
        previous: f32,
    },

    #[error("body {name:?}: {reason}")]
    InvalidBody { name: String, reason: String },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid_body(name: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidBody {
            name: name.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
