use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// Asset manifest describing every texture a game uses.
/// Loaded from JSON or built in code by the game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    pub textures: Vec<TextureDescriptor>,
}

/// A texture: a horizontal strip of equally sized frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Key game code uses to refer to the texture ("player", "trash", ...).
    pub key: String,
    /// URL of a PNG sheet. `None` means the texture is always generated.
    #[serde(default)]
    pub path: Option<String>,
    pub frame_width: u32,
    pub frame_height: u32,
    #[serde(default = "default_frames")]
    pub frames: u32,
    /// Body colour for generated sheets.
    #[serde(default = "default_color")]
    pub color: [u8; 3],
    /// Solid colour of the degraded 1x1 texture used when generation fails.
    #[serde(default = "default_color")]
    pub fallback_color: [u8; 3],
}

fn default_frames() -> u32 {
    1
}

fn default_color() -> [u8; 3] {
    [128, 128, 128]
}

impl TextureDescriptor {
    /// Full sheet width in pixels.
    pub fn sheet_width(&self) -> u32 {
        self.frame_width.saturating_mul(self.frames)
    }
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn get(&self, key: &str) -> Option<&TextureDescriptor> {
        self.textures.iter().find(|t| t.key == key)
    }
}
