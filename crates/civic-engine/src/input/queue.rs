use glam::Vec2;

/// Pointer input, in world coordinates (the host un-scales the canvas).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
}

impl InputEvent {
    pub fn pos(&self) -> Vec2 {
        match *self {
            InputEvent::PointerDown { x, y }
            | InputEvent::PointerUp { x, y }
            | InputEvent::PointerMove { x, y } => Vec2::new(x, y),
        }
    }
}

/// Events gathered between frames. The runner hands a frame's batch to the
/// first fixed step of that frame.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Take everything queued so far.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InputEvent> {
        self.pending.iter()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl From<Vec<InputEvent>> for InputQueue {
    fn from(pending: Vec<InputEvent>) -> Self {
        Self { pending }
    }
}
