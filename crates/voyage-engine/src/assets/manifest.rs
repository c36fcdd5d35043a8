use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Texture manifest: every image the renderer may bind to a body.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextureManifest {
    /// Texture name (the catalog's texture reference) → file.
    #[serde(default)]
    pub textures: HashMap<String, TextureDescriptor>,
}

/// Describes a single texture file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Relative path to the image (e.g., "textures/earth_daymap.jpg").
    pub path: String,
    /// How the renderer samples it (default: surface).
    #[serde(default)]
    pub kind: TextureKind,
}

/// Material slot a texture is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureKind {
    /// Lit diffuse map.
    #[default]
    Surface,
    /// Unlit, self-illuminated map (the anchor star).
    Emissive,
    /// Alpha-blended ring strip.
    Ring,
}

impl TextureManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_with_kinds() {
        let json = r#"{
            "textures": {
                "sun": { "path": "sun.jpg", "kind": "emissive" },
                "saturn_ring": { "path": "saturn_ring.png", "kind": "ring" },
                "earth": { "path": "earth.jpg" }
            }
        }"#;
        let manifest = TextureManifest::from_json(json).unwrap();
        assert_eq!(manifest.textures.len(), 3);
        assert_eq!(manifest.textures["sun"].kind, TextureKind::Emissive);
        assert_eq!(manifest.textures["saturn_ring"].kind, TextureKind::Ring);

        let earth = &manifest.textures["earth"];
        assert_eq!(earth.path, "earth.jpg");
        assert_eq!(earth.kind, TextureKind::Surface);
    }

    #[test]
    fn parse_empty_manifest() {
        let manifest = TextureManifest::from_json("{}").unwrap();
        assert!(manifest.textures.is_empty());
    }

    #[test]
    fn rejects_missing_path() {
        assert!(TextureManifest::from_json(r#"{ "textures": { "a": {} } }"#).is_err());
    }
}
