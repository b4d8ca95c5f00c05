/// Identifies which texture a sprite samples from.
/// Index into the SpriteRegistry's texture list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasId(pub u32);

/// How an entity is drawn: which atlas, which frame, and how.
///
/// Textures are horizontal frame strips; `frame` selects the cell.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteComponent {
    /// Which texture this sprite samples.
    pub atlas: AtlasId,
    /// Frame index within the strip.
    pub frame: u32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Mirror horizontally.
    pub flip_x: bool,
}

impl SpriteComponent {
    pub fn new(atlas: AtlasId) -> Self {
        Self {
            atlas,
            ..Default::default()
        }
    }

    pub fn with_frame(mut self, frame: u32) -> Self {
        self.frame = frame;
        self
    }
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self {
            atlas: AtlasId(0),
            frame: 0,
            alpha: 1.0,
            flip_x: false,
        }
    }
}
