use bytemuck::{Pod, Zeroable};

/// Per-instance render data read by the host renderer straight out of WASM memory.
/// Must match the TypeScript reader: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Center X in world space.
    pub x: f32,
    /// Center Y in world space.
    pub y: f32,
    /// Rendered width in world units.
    pub width: f32,
    /// Rendered height in world units.
    pub height: f32,
    /// Texture index (AtlasId).
    pub atlas: f32,
    /// Frame index within the texture strip.
    pub frame: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Bit flags, see [`RenderInstance::FLIP_X`].
    pub flags: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// Mirror the sprite horizontally.
    pub const FLIP_X: u32 = 1;
}

/// Render buffer containing all sprite instances for one frame, in draw order.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    capacity: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Push an instance. Returns false once the buffer is full.
    pub fn push(&mut self, instance: RenderInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for host-side reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Instance data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), RenderInstance::STRIDE_BYTES);
        assert_eq!(RenderInstance::FLOATS, 8);
    }

    #[test]
    fn push_stops_at_capacity() {
        let mut buf = RenderBuffer::with_capacity(2);
        assert!(buf.push(RenderInstance::default()));
        assert!(buf.push(RenderInstance::default()));
        assert!(!buf.push(RenderInstance::default()));
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.as_floats().len(), 16);
    }
}
