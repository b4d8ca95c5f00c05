//! Horizontal position tweens keyed by entity.
//!
//! ```ignore
//! ctx.tweens.add(npc, Tween::position_x(200.0, 250.0, 2.0).with_loop(TweenLoop::PingPong));
//! ```
//!
//! The runner ticks every tween once per fixed step, after physics, so a
//! tweened entity without a body is never overwritten by the solver.

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::scene::Scene;

/// Behaviour at the end of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenLoop {
    /// One leg, then the tween is dropped.
    #[default]
    Once,
    /// Yoyo: alternate legs forward and backward forever.
    PingPong,
}

/// Linear move of an entity's x between two values; y is left to the game.
#[derive(Debug, Clone)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    /// Seconds per leg.
    pub duration: f32,
    pub loop_mode: TweenLoop,
    elapsed: f32,
    /// Odd legs of a ping-pong run backwards.
    leg: u32,
}

impl Tween {
    pub fn position_x(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            loop_mode: TweenLoop::Once,
            elapsed: 0.0,
            leg: 0,
        }
    }

    pub fn with_loop(self, loop_mode: TweenLoop) -> Self {
        Self { loop_mode, ..self }
    }

    /// Progress along `from -> to`.
    fn progress(&self) -> f32 {
        let t = if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        };
        if self.leg % 2 == 1 {
            1.0 - t
        } else {
            t
        }
    }

    /// Advance and apply. Returns false once a `Once` tween has finished.
    fn advance(&mut self, dt: f32, entity: &mut Entity) -> bool {
        self.elapsed += dt;
        entity.pos.x = self.from + (self.to - self.from) * self.progress();
        if self.elapsed < self.duration {
            return true;
        }
        match self.loop_mode {
            TweenLoop::Once => false,
            TweenLoop::PingPong => {
                self.elapsed = 0.0;
                self.leg = self.leg.wrapping_add(1);
                true
            }
        }
    }
}

/// Handle returned by [`TweenState::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(pub u32);

#[derive(Debug)]
struct Slot {
    id: TweenId,
    entity: EntityId,
    tween: Tween,
}

/// Every running tween, in insertion order.
#[derive(Debug, Default)]
pub struct TweenState {
    slots: Vec<Slot>,
    next_id: u32,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entity: EntityId, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.slots.push(Slot { id, entity, tween });
        id
    }

    /// Stop one tween, leaving the entity where it is.
    pub fn remove(&mut self, id: TweenId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.id != id);
        self.slots.len() != before
    }

    /// Stop every tween driving `entity`.
    pub fn remove_entity(&mut self, entity: EntityId) {
        self.slots.retain(|slot| slot.entity != entity);
    }

    /// Advance all tweens by `dt`. Tweens whose entity is gone are dropped.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) {
        self.slots.retain_mut(|slot| match scene.get_mut(slot.entity) {
            Some(entity) => slot.tween.advance(dt, entity),
            None => false,
        });
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn scene_with(entity: Entity) -> Scene {
        let mut scene = Scene::new();
        scene.spawn(entity);
        scene
    }

    fn x(scene: &Scene, id: EntityId) -> f32 {
        scene.get(id).map(|e| e.pos.x).unwrap_or(f32::NAN)
    }

    #[test]
    fn once_lands_on_target_then_drops() {
        let id = EntityId(1);
        let mut scene = scene_with(Entity::new(id));
        let mut tweens = TweenState::new();
        tweens.add(id, Tween::position_x(0.0, 100.0, 1.0));

        tweens.tick(0.5, &mut scene);
        assert!((x(&scene, id) - 50.0).abs() < 0.01);

        tweens.tick(0.5, &mut scene);
        assert_eq!(x(&scene, id), 100.0);
        assert!(tweens.is_empty());
    }

    #[test]
    fn ping_pong_wanders_between_ends() {
        let npc = EntityId(4);
        let mut scene = scene_with(Entity::new(npc).with_pos(Vec2::new(200.0, 200.0)));
        let mut tweens = TweenState::new();
        tweens.add(npc, Tween::position_x(200.0, 250.0, 2.0).with_loop(TweenLoop::PingPong));

        let mut samples = Vec::new();
        for _ in 0..4 {
            tweens.tick(1.0, &mut scene);
            samples.push(x(&scene, npc).round());
        }
        assert_eq!(samples, vec![225.0, 250.0, 225.0, 200.0]);
        assert_eq!(scene.get(npc).map(|e| e.pos.y), Some(200.0));
        assert_eq!(tweens.len(), 1);
    }

    #[test]
    fn missing_entity_drops_its_tweens() {
        let mut scene = Scene::new();
        let mut tweens = TweenState::new();
        tweens.add(EntityId(9), Tween::position_x(0.0, 1.0, 1.0).with_loop(TweenLoop::PingPong));
        tweens.tick(0.1, &mut scene);
        assert!(tweens.is_empty());
    }

    #[test]
    fn remove_by_id_and_by_entity() {
        let mut tweens = TweenState::new();
        let a = tweens.add(EntityId(1), Tween::position_x(0.0, 1.0, 1.0));
        tweens.add(EntityId(1), Tween::position_x(1.0, 0.0, 1.0));
        tweens.add(EntityId(2), Tween::position_x(0.0, 1.0, 1.0));

        assert!(tweens.remove(a));
        assert!(!tweens.remove(a));
        tweens.remove_entity(EntityId(1));
        assert_eq!(tweens.len(), 1);
    }
}
