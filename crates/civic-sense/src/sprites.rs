//! Texture keys and the sprite sheets the mission scene draws with.

use civic_engine::{AssetManifest, TextureDescriptor};

pub const PLAYER: &str = "player";
pub const NPC: &str = "npc";
pub const TRASH: &str = "trash";
pub const BIN: &str = "bin";

fn sheet(
    key: &str,
    frame: u32,
    frames: u32,
    color: [u8; 3],
    fallback_color: [u8; 3],
) -> TextureDescriptor {
    TextureDescriptor {
        key: key.to_string(),
        path: Some(format!("/assets/sprites/{key}.png")),
        frame_width: frame,
        frame_height: frame,
        frames,
        color,
        fallback_color,
    }
}

/// The four sheets, in atlas order. Paths point at the static PNGs; the
/// colours drive procedural generation and its 1x1 fallback.
pub fn manifest() -> AssetManifest {
    AssetManifest {
        textures: vec![
            sheet(PLAYER, 32, 4, [100, 150, 255], [0, 0, 255]),
            sheet(NPC, 32, 4, [255, 150, 100], [255, 255, 0]),
            sheet(TRASH, 16, 1, [255, 50, 50], [255, 0, 0]),
            sheet(BIN, 32, 1, [50, 200, 50], [0, 255, 0]),
        ],
    }
}
