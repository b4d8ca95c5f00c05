use std::collections::HashMap;

use glam::Vec2;

use crate::assets::manifest::AssetManifest;
use crate::components::sprite::{AtlasId, SpriteComponent};

/// What game code needs to know about a loaded texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteInfo {
    pub atlas: AtlasId,
    pub frames: u32,
    /// Native frame size in pixels.
    pub frame_size: Vec2,
}

/// Name → texture lookup, built from an AssetManifest.
/// Atlas ids are manifest indices, so the host uploads textures in the same order.
#[derive(Debug, Default)]
pub struct SpriteRegistry {
    sprites: HashMap<String, SpriteInfo>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let sprites = manifest
            .textures
            .iter()
            .enumerate()
            .map(|(i, desc)| {
                let info = SpriteInfo {
                    atlas: AtlasId(i as u32),
                    frames: desc.frames.max(1),
                    frame_size: Vec2::new(desc.frame_width as f32, desc.frame_height as f32),
                };
                (desc.key.clone(), info)
            })
            .collect();
        Self { sprites }
    }

    pub fn info(&self, key: &str) -> Option<&SpriteInfo> {
        self.sprites.get(key)
    }

    /// A sprite showing frame 0 of `key`.
    pub fn sprite(&self, key: &str) -> Option<SpriteComponent> {
        self.info(key).map(|info| SpriteComponent::new(info.atlas))
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
