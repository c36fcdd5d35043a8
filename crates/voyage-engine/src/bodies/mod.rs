pub mod body;
pub mod catalog;
pub mod registry;

pub use body::CelestialBody;
pub use registry::BodyRegistry;
