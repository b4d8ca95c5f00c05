//! Pointer interaction: turns raw pointer events into presses and drags
//! against the scene's interactive entities.

use glam::Vec2;

use crate::api::types::EntityId;
use crate::core::scene::Scene;
use crate::input::queue::InputEvent;

/// What a pointer event meant for the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Pressed on an interactive entity.
    Pressed { entity: EntityId, pos: Vec2 },
    /// Pressed where no interactive entity is.
    PressedEmpty { pos: Vec2 },
    /// A draggable entity should move so that it stays under the pointer.
    /// `pos` is the entity's new center, grab offset already applied.
    Dragged { entity: EntityId, pos: Vec2 },
    /// The drag of `entity` ended.
    Released { entity: EntityId },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PointerMode {
    Idle,
    /// Pointer held, nothing grabbed.
    Held,
    /// Dragging an entity; `offset` is entity center minus grab point.
    Dragging { entity: EntityId, offset: Vec2 },
}

/// Tracks press/drag state across pointer events.
#[derive(Debug)]
pub struct PointerSystem {
    mode: PointerMode,
}

impl PointerSystem {
    pub fn new() -> Self {
        Self {
            mode: PointerMode::Idle,
        }
    }

    /// The entity being dragged, if any.
    pub fn dragging(&self) -> Option<EntityId> {
        match self.mode {
            PointerMode::Dragging { entity, .. } => Some(entity),
            _ => None,
        }
    }

    /// Interpret one input event against the scene.
    pub fn handle(&mut self, event: &InputEvent, scene: &Scene) -> Option<PointerAction> {
        match *event {
            InputEvent::PointerDown { x, y } => {
                let pos = Vec2::new(x, y);
                match scene.hit_test(pos).and_then(|id| scene.get(id)) {
                    Some(entity) => {
                        self.mode = if entity.draggable {
                            PointerMode::Dragging {
                                entity: entity.id,
                                offset: entity.pos - pos,
                            }
                        } else {
                            PointerMode::Held
                        };
                        Some(PointerAction::Pressed { entity: entity.id, pos })
                    }
                    None => {
                        self.mode = PointerMode::Held;
                        Some(PointerAction::PressedEmpty { pos })
                    }
                }
            }
            InputEvent::PointerMove { x, y } => match self.mode {
                PointerMode::Dragging { entity, offset } => {
                    if !scene.contains(entity) {
                        // Destroyed mid-drag (e.g. dropped into the bin).
                        self.mode = PointerMode::Held;
                        return None;
                    }
                    Some(PointerAction::Dragged {
                        entity,
                        pos: Vec2::new(x, y) + offset,
                    })
                }
                _ => None,
            },
            InputEvent::PointerUp { .. } => {
                let previous = std::mem::replace(&mut self.mode, PointerMode::Idle);
                match previous {
                    PointerMode::Dragging { entity, .. } => Some(PointerAction::Released { entity }),
                    _ => None,
                }
            }
        }
    }

    pub fn reset(&mut self) {
        self.mode = PointerMode::Idle;
    }
}

impl Default for PointerSystem {
    fn default() -> Self {
        Self::new()
    }
}
