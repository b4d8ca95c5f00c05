use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Entity storage in spawn order.
///
/// Spawn order is draw order: later entities are drawn above earlier ones and
/// win pointer hit tests.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(64),
        }
    }

    /// Add an entity on top of everything spawned so far.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID, keeping the order of the rest.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Topmost active, interactive entity under `point`.
    pub fn hit_test(&self, point: Vec2) -> Option<EntityId> {
        self.entities
            .iter()
            .rev()
            .find(|e| e.active && e.interactive && e.contains(point))
            .map(|e| e.id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_pos(Vec2::new(10.0, 20.0)));
        assert_eq!(scene.get(id).unwrap().pos, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn despawn_preserves_order() {
        let mut scene = Scene::new();
        for i in 1..=3 {
            scene.spawn(Entity::new(EntityId(i)));
        }
        scene.despawn(EntityId(1));
        let ids: Vec<_> = scene.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EntityId(2), EntityId(3)]);
        assert!(scene.despawn(EntityId(1)).is_none());
    }

    #[test]
    fn hit_test_prefers_topmost_interactive() {
        let mut scene = Scene::new();
        let boxed = |id: u32| {
            Entity::new(EntityId(id))
                .with_pos(Vec2::new(50.0, 50.0))
                .with_size(Vec2::splat(20.0))
        };
        scene.spawn(boxed(1).interactive());
        scene.spawn(boxed(2).interactive());
        scene.spawn(boxed(3));

        assert_eq!(scene.hit_test(Vec2::new(55.0, 45.0)), Some(EntityId(2)));
        assert_eq!(scene.hit_test(Vec2::new(100.0, 100.0)), None);

        scene.get_mut(EntityId(2)).unwrap().active = false;
        assert_eq!(scene.hit_test(Vec2::new(55.0, 45.0)), Some(EntityId(1)));
    }
}
