use std::collections::HashMap;

use log::warn;

use crate::api::types::{TextureHandle, TextureRef};
use crate::assets::manifest::{TextureKind, TextureManifest};

/// Anything that can turn a catalog texture reference into a renderer slot.
pub trait TextureSource {
    /// `None` if the texture is unknown or failed to load.
    fn resolve(&self, texture: &TextureRef) -> Option<TextureHandle>;

    /// Like [`Self::resolve`], but a missing texture is drawn with the
    /// placeholder. Never fails.
    fn resolve_or_placeholder(&self, texture: &TextureRef) -> TextureHandle {
        self.resolve(texture).unwrap_or_else(|| {
            warn!("texture {:?} unavailable, using placeholder", texture.as_str());
            TextureHandle::PLACEHOLDER
        })
    }
}

/// One registered texture.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureEntry {
    pub handle: TextureHandle,
    pub path: String,
    pub kind: TextureKind,
}

/// Registry of named textures, built from a TextureManifest.
/// Handles start at 1; 0 is the placeholder.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    textures: HashMap<String, TextureEntry>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed manifest. Handles are assigned in name
    /// order so the same manifest always yields the same slots.
    pub fn from_manifest(manifest: &TextureManifest) -> Self {
        let mut names: Vec<&String> = manifest.textures.keys().collect();
        names.sort();
        let mut textures = HashMap::with_capacity(names.len());
        for (i, name) in names.into_iter().enumerate() {
            let desc = &manifest.textures[name];
            textures.insert(
                name.clone(),
                TextureEntry {
                    handle: TextureHandle(i as u32 + 1),
                    path: desc.path.clone(),
                    kind: desc.kind,
                },
            );
        }
        Self { textures }
    }

    /// Look up a texture by name.
    pub fn get(&self, name: &str) -> Option<&TextureEntry> {
        self.textures.get(name)
    }

    /// Registered textures ordered by handle, for the renderer's load list.
    pub fn entries(&self) -> Vec<&TextureEntry> {
        let mut entries: Vec<_> = self.textures.values().collect();
        entries.sort_by_key(|e| e.handle.0);
        entries
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl TextureSource for TextureRegistry {
    fn resolve(&self, texture: &TextureRef) -> Option<TextureHandle> {
        self.textures.get(texture.as_str()).map(|e| e.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TextureRegistry {
        let json = r#"{
            "textures": {
                "venus": { "path": "venus.jpg" },
                "earth": { "path": "earth.jpg" },
                "sun": { "path": "sun.jpg", "kind": "emissive" }
            }
        }"#;
        TextureRegistry::from_manifest(&TextureManifest::from_json(json).unwrap())
    }

    #[test]
    fn assigns_handles_in_name_order() {
        let reg = registry();
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.get("earth").unwrap().handle, TextureHandle(1));
        assert_eq!(reg.get("sun").unwrap().handle, TextureHandle(2));
        assert_eq!(reg.get("venus").unwrap().handle, TextureHandle(3));
        assert_eq!(reg.get("sun").unwrap().kind, TextureKind::Emissive);
    }

    #[test]
    fn entries_ordered_by_handle() {
        let reg = registry();
        let paths: Vec<_> = reg.entries().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["earth.jpg", "sun.jpg", "venus.jpg"]);
    }

    #[test]
    fn resolves_known_texture() {
        let reg = registry();
        assert_eq!(reg.resolve(&TextureRef::from("venus")), Some(TextureHandle(3)));
    }

    #[test]
    fn unknown_texture_gets_placeholder() {
        let reg = registry();
        let handle = reg.resolve_or_placeholder(&TextureRef::from("pluto"));
        assert!(handle.is_placeholder());
        assert!(TextureRegistry::new()
            .resolve_or_placeholder(&TextureRef::from("earth"))
            .is_placeholder());
    }
}
