use crate::components::entity::Entity;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from entities in draw order.
/// Inactive entities and entities without a sprite are skipped.
pub fn build_render_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut RenderBuffer) {
    buffer.clear();

    for entity in entities {
        if !entity.active {
            continue;
        }
        let Some(sprite) = &entity.sprite else {
            continue;
        };

        let flags = if sprite.flip_x { RenderInstance::FLIP_X } else { 0 };
        let pushed = buffer.push(RenderInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            width: entity.size.x,
            height: entity.size.y,
            atlas: sprite.atlas.0 as f32,
            frame: sprite.frame as f32,
            alpha: sprite.alpha,
            flags: flags as f32,
        });
        if !pushed {
            log::warn!("Render buffer full, dropping remaining sprites");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::sprite::{AtlasId, SpriteComponent};
    use glam::Vec2;

    #[test]
    fn build_buffer_keeps_draw_order() {
        let entities = vec![
            Entity::new(EntityId(1))
                .with_pos(Vec2::new(10.0, 20.0))
                .with_size(Vec2::splat(32.0))
                .with_sprite(SpriteComponent::new(AtlasId(3))),
            Entity::new(EntityId(2)).with_pos(Vec2::new(1.0, 1.0)),
            Entity::new(EntityId(3))
                .with_pos(Vec2::new(50.0, 60.0))
                .with_size(Vec2::new(64.0, 32.0))
                .with_sprite(SpriteComponent {
                    frame: 2,
                    flip_x: true,
                    ..Default::default()
                }),
        ];

        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer);

        assert_eq!(buffer.instance_count(), 2);
        assert_eq!(buffer.instances[0].x, 10.0);
        assert_eq!(buffer.instances[0].atlas, 3.0);
        assert_eq!(buffer.instances[1].width, 64.0);
        assert_eq!(buffer.instances[1].frame, 2.0);
        assert_eq!(buffer.instances[1].flags, 1.0);
    }

    #[test]
    fn inactive_entities_are_skipped() {
        let mut hidden = Entity::new(EntityId(1)).with_sprite(SpriteComponent::default());
        hidden.active = false;
        let mut buffer = RenderBuffer::new();
        build_render_buffer(std::iter::once(&hidden), &mut buffer);
        assert_eq!(buffer.instance_count(), 0);
    }
}
