//! Steps every animation clip and copies its frame into the sprite.

use crate::core::scene::Scene;

/// Tick all entity animations and copy the current frame into the sprite.
pub fn tick_animations(scene: &mut Scene, dt: f32) {
    for entity in scene.iter_mut() {
        let Some(anim) = entity.animation.as_mut() else {
            continue;
        };
        anim.tick(dt);
        if let (Some(frame), Some(sprite)) = (anim.current_frame(), entity.sprite.as_mut()) {
            sprite.frame = frame;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::animation::{AnimationComponent, AnimationDef};
    use crate::components::entity::Entity;
    use crate::components::sprite::SpriteComponent;

    #[test]
    fn tick_updates_sprite_frame() {
        let mut scene = Scene::new();
        let mut anim = AnimationComponent::new().with("walk", AnimationDef::strip(0, 3, 10.0));
        anim.play("walk");

        scene.spawn(
            Entity::new(EntityId(1))
                .with_sprite(SpriteComponent::default())
                .with_animation(anim),
        );

        tick_animations(&mut scene, 0.15);
        let frame = scene.get(EntityId(1)).unwrap().sprite.as_ref().unwrap().frame;
        assert_eq!(frame, 1);
    }

    #[test]
    fn switching_to_idle_resets_sprite() {
        let mut scene = Scene::new();
        let mut anim = AnimationComponent::new()
            .with("idle", AnimationDef::still(0))
            .with("walk", AnimationDef::strip(0, 3, 8.0));
        anim.play("walk");
        scene.spawn(
            Entity::new(EntityId(1))
                .with_sprite(SpriteComponent::default())
                .with_animation(anim),
        );

        tick_animations(&mut scene, 0.3);
        assert_ne!(scene.get(EntityId(1)).unwrap().sprite.as_ref().unwrap().frame, 0);

        if let Some(anim) = scene.get_mut(EntityId(1)).and_then(|e| e.animation.as_mut()) {
            anim.play("idle");
        }
        tick_animations(&mut scene, 0.01);
        assert_eq!(scene.get(EntityId(1)).unwrap().sprite.as_ref().unwrap().frame, 0);
    }
}
