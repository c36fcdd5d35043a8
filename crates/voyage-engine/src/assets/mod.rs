pub mod manifest;
pub mod registry;

pub use manifest::{TextureDescriptor, TextureKind, TextureManifest};
pub use registry::{TextureEntry, TextureRegistry, TextureSource};
