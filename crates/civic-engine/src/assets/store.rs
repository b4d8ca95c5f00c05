use serde::{Deserialize, Serialize};

use crate::assets::manifest::AssetManifest;
use crate::assets::procedural::{generate_sheet, TextureData};
use crate::assets::registry::SpriteRegistry;

/// Where textures come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStrategy {
    /// The host loads PNG sheets from each descriptor's `path`.
    #[default]
    StaticFiles,
    /// Every sheet is painted in memory.
    Procedural,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TextureSource {
    /// Host fetches this URL.
    File(String),
    /// Pixels are ready to upload.
    Generated(TextureData),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTexture {
    pub key: String,
    pub source: TextureSource,
}

/// Textures resolved for a scene, in atlas order.
#[derive(Debug, Default)]
pub struct AssetStore {
    registry: SpriteRegistry,
    textures: Vec<LoadedTexture>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every texture in `manifest`. Never fails: a sheet that cannot
    /// be generated degrades to a 1x1 texture of its fallback colour.
    pub fn load(manifest: &AssetManifest, strategy: AssetStrategy) -> Self {
        let textures = manifest
            .textures
            .iter()
            .map(|desc| {
                let source = match (&desc.path, strategy) {
                    (Some(path), AssetStrategy::StaticFiles) => TextureSource::File(path.clone()),
                    _ => match generate_sheet(desc) {
                        Ok(data) => TextureSource::Generated(data),
                        Err(e) => {
                            log::warn!("Texture '{}' fell back to a solid colour: {e}", desc.key);
                            TextureSource::Generated(TextureData::solid(desc.fallback_color))
                        }
                    },
                };
                LoadedTexture {
                    key: desc.key.clone(),
                    source,
                }
            })
            .collect();

        log::info!("Loaded {} textures ({:?})", manifest.textures.len(), strategy);
        Self {
            registry: SpriteRegistry::from_manifest(manifest),
            textures,
        }
    }

    pub fn registry(&self) -> &SpriteRegistry {
        &self.registry
    }

    pub fn textures(&self) -> &[LoadedTexture] {
        &self.textures
    }

    pub fn texture(&self, index: usize) -> Option<&LoadedTexture> {
        self.textures.get(index)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
