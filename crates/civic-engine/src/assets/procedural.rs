//! Procedural sprite sheets: a solid body with an outline and a pair of eyes.
//!
//! Odd frames lower the eyes a little, so four-frame strips read as a walk cycle.

use crate::assets::manifest::TextureDescriptor;
use crate::error::AssetError;

/// Widest sheet we are willing to generate.
pub const MAX_SHEET_WIDTH: u32 = 4096;

const BLACK: [u8; 4] = [0, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

/// RGBA8 pixels, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureData {
    fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect();
        Self { width, height, pixels }
    }

    /// A 1x1 texture of one colour.
    pub fn solid([r, g, b]: [u8; 3]) -> Self {
        Self::filled(1, 1, [r, g, b, 255])
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[i..i + 4]);
        Some(out)
    }

    fn put(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x < self.width && y < self.height {
            let i = ((y * self.width + x) * 4) as usize;
            self.pixels[i..i + 4].copy_from_slice(&rgba);
        }
    }

    /// Fill the pixels whose centers fall inside the rectangle.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, rgba: [u8; 4]) {
        let x0 = x.round().max(0.0) as u32;
        let y0 = y.round().max(0.0) as u32;
        let x1 = (x + w).round().max(0.0) as u32;
        let y1 = (y + h).round().max(0.0) as u32;
        for py in y0..y1 {
            for px in x0..x1 {
                self.put(px, py, rgba);
            }
        }
    }

    fn outline(&mut self, x0: u32, w: u32, h: u32, rgba: [u8; 4]) {
        for px in x0..x0 + w {
            self.put(px, 0, rgba);
            self.put(px, h - 1, rgba);
        }
        for py in 0..h {
            self.put(x0, py, rgba);
            self.put(x0 + w - 1, py, rgba);
        }
    }
}

/// Paint the sheet described by `desc`.
pub fn generate_sheet(desc: &TextureDescriptor) -> Result<TextureData, AssetError> {
    let (w, h, frames) = (desc.frame_width, desc.frame_height, desc.frames);
    if w == 0 || h == 0 || frames == 0 || desc.sheet_width() > MAX_SHEET_WIDTH || h > MAX_SHEET_WIDTH {
        return Err(AssetError::InvalidDimensions {
            key: desc.key.clone(),
            width: w,
            height: h,
            frames,
        });
    }

    let [r, g, b] = desc.color;
    let mut tex = TextureData::filled(w * frames, h, [r, g, b, 255]);
    let (fw, fh) = (w as f32, h as f32);
    let eye = (0.15 * fw, 0.15 * fh);

    for i in 0..frames {
        let x0 = (i * w) as f32;
        tex.outline(i * w, w, h, BLACK);

        let eyes = [x0 + 0.3 * fw, x0 + 0.6 * fw];
        for ex in eyes {
            tex.fill_rect(ex, 0.2 * fh, eye.0, eye.1, BLACK);
        }

        if i % 2 == 1 {
            for ex in eyes {
                tex.fill_rect(ex, 0.2 * fh, eye.0, eye.1, WHITE);
                tex.fill_rect(ex, 0.25 * fh, eye.0, eye.1, BLACK);
            }
        }
    }

    Ok(tex)
}
