use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::animation::AnimationComponent;
use crate::components::sprite::SpriteComponent;
#[cfg(feature = "physics")]
use crate::core::physics::PhysicsBody;

/// One scene object. Optional parts are plain `Option` fields.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    /// String tag for finding entities by role ("trash", "bin", ...).
    pub tag: String,
    /// Inactive entities are neither drawn nor hit-tested.
    pub active: bool,
    /// Center position in world space.
    pub pos: Vec2,
    /// Rendered size in world units. Also the pointer hit box.
    pub size: Vec2,
    /// Receives pointer presses.
    pub interactive: bool,
    /// Follows the pointer while pressed. Implies `interactive`.
    pub draggable: bool,
    pub sprite: Option<SpriteComponent>,
    pub animation: Option<AnimationComponent>,
    #[cfg(feature = "physics")]
    pub body: Option<PhysicsBody>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec2::ZERO,
            size: Vec2::ONE,
            interactive: false,
            draggable: false,
            sprite: None,
            animation: None,
            #[cfg(feature = "physics")]
            body: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn with_animation(mut self, animation: AnimationComponent) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    pub fn draggable(mut self) -> Self {
        self.interactive = true;
        self.draggable = true;
        self
    }

    #[cfg(feature = "physics")]
    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Whether a world-space point falls inside this entity's box.
    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.size * 0.5;
        let d = (point - self.pos).abs();
        d.x <= half.x && d.y <= half.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_uses_centered_box() {
        let e = Entity::new(EntityId(1))
            .with_pos(Vec2::new(100.0, 100.0))
            .with_size(Vec2::splat(32.0));
        assert!(e.contains(Vec2::new(100.0, 100.0)));
        assert!(e.contains(Vec2::new(116.0, 84.0)));
        assert!(!e.contains(Vec2::new(117.0, 100.0)));
    }

    #[test]
    fn draggable_implies_interactive() {
        let e = Entity::new(EntityId(1)).draggable();
        assert!(e.interactive && e.draggable);
    }
}
