use crate::api::types::{EntityId, GameEvent};
use crate::assets::manifest::AssetManifest;
use crate::assets::store::{AssetStore, AssetStrategy};
use crate::components::entity::Entity;
use crate::core::registry::Registry;
use crate::core::scene::Scene;
use crate::core::time::Timers;
use crate::extensions::tween::TweenState;
use crate::input::queue::InputQueue;
use crate::systems::hud::HudState;
#[cfg(feature = "physics")]
use crate::core::physics::{BodyDesc, ColliderMaterial, PhysicsBody, PhysicsWorld};
use glam::Vec2;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Maximum number of render instances (default: 512).
    pub max_instances: usize,
    /// Background colour as 0xRRGGBB (default: sky blue).
    pub clear_color: u32,
    /// Gravity vector for physics simulation. Default: zero (top-down world).
    #[cfg(feature = "physics")]
    pub gravity: Vec2,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            max_instances: 512,
            clear_color: 0x87CEEB,
            #[cfg(feature = "physics")]
            gravity: Vec2::ZERO,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step. `input` holds this frame's events on the first step
    /// of a frame and is empty on the rest.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Called once when the host shuts the game down, before the engine
    /// drops its timers and entities.
    fn teardown(&mut self, _ctx: &mut EngineContext) {}
}

/// Games the bridge can build from the host-filled registry.
pub trait FromRegistry {
    fn from_registry(registry: &Registry) -> Self;
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub timers: Timers,
    pub tweens: TweenState,
    pub hud: HudState,
    pub assets: AssetStore,
    /// Outbox of game events, drained by the host.
    pub events: Vec<GameEvent>,
    next_id: u32,
    #[cfg(feature = "physics")]
    pub physics: PhysicsWorld,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            timers: Timers::new(),
            tweens: TweenState::new(),
            hud: HudState::default(),
            assets: AssetStore::new(),
            events: Vec::new(),
            next_id: 1,
            #[cfg(feature = "physics")]
            physics: PhysicsWorld::new(Vec2::ZERO),
        }
    }

    /// Create an EngineContext for the given config.
    pub fn from_config(config: &GameConfig) -> Self {
        #[allow(unused_mut)]
        let mut ctx = Self::new();
        #[cfg(feature = "physics")]
        {
            ctx.physics = PhysicsWorld::new(config.gravity);
            ctx.physics.set_dt(config.fixed_dt);
        }
        #[cfg(not(feature = "physics"))]
        let _ = config;
        ctx
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Resolve the textures in `manifest` and make them available to the host.
    pub fn load_assets(&mut self, manifest: &AssetManifest, strategy: AssetStrategy) {
        self.assets = AssetStore::load(manifest, strategy);
    }

    /// Queue a game event for the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        log::info!("Event: {}", event.name);
        self.events.push(event);
    }

    /// Take all queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.scene.spawn(entity);
        id
    }

    /// Despawn an entity, cleaning up its tweens and physics body.
    pub fn despawn(&mut self, id: EntityId) {
        self.tweens.remove_entity(id);
        let removed = self.scene.despawn(id);
        #[cfg(feature = "physics")]
        if let Some(body) = removed.as_ref().and_then(|e| e.body.as_ref()) {
            self.physics.remove_body(body);
        }
        #[cfg(not(feature = "physics"))]
        let _ = removed;
    }

    /// Move an entity, teleporting its body along if it has one.
    pub fn set_position(&mut self, id: EntityId, pos: Vec2) {
        let Some(entity) = self.scene.get_mut(id) else {
            return;
        };
        entity.pos = pos;
        #[cfg(feature = "physics")]
        if let Some(body) = &entity.body {
            self.physics.reset_body(body, pos);
        }
    }

    /// Drop every entity, body, timer, tween and queued event.
    pub fn clear(&mut self) {
        self.timers.clear();
        self.tweens.clear();
        self.scene.clear();
        self.events.clear();
        self.hud.clear();
        #[cfg(feature = "physics")]
        self.physics.clear();
    }

    // -- Physics convenience methods --

    /// Spawn an entity with a physics body. Returns the EntityId.
    /// The body starts at the entity's position.
    #[cfg(feature = "physics")]
    pub fn spawn_with_body(
        &mut self,
        entity: Entity,
        desc: BodyDesc,
        material: ColliderMaterial,
    ) -> EntityId {
        let id = entity.id;
        let desc = desc.with_position(entity.pos);
        let body = self.physics.create_body(id, &desc, material);
        self.scene.spawn(entity.with_body(body));
        id
    }

    #[cfg(feature = "physics")]
    fn body(&self, id: EntityId) -> Option<&PhysicsBody> {
        self.scene.get(id).and_then(|e| e.body.as_ref())
    }

    /// Set the linear velocity of an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn set_velocity(&mut self, id: EntityId, vel: Vec2) {
        if let Some(body) = self.scene.get(id).and_then(|e| e.body) {
            self.physics.set_velocity(&body, vel);
        }
    }

    /// Get the linear velocity of an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn velocity(&self, id: EntityId) -> Vec2 {
        self.body(id)
            .map(|body| self.physics.velocity(body))
            .unwrap_or(Vec2::ZERO)
    }

    /// Whether the colliders of two entities currently overlap.
    #[cfg(feature = "physics")]
    pub fn overlaps(&self, a: EntityId, b: EntityId) -> bool {
        match (self.body(a), self.body(b)) {
            (Some(a), Some(b)) => self.physics.intersects(a, b),
            _ => false,
        }
    }

    /// Step the physics simulation and sync positions back to entities.
    /// Called automatically by the game runner after `Game::update()`.
    #[cfg(feature = "physics")]
    pub fn step_physics(&mut self) {
        self.physics.step();
        for entity in self.scene.iter_mut() {
            if let Some(body) = &entity.body {
                entity.pos = self.physics.body_position(body);
            }
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn events_drain_in_order() {
        let mut ctx = EngineContext::new();
        ctx.emit_event(GameEvent::new("A", json!(1)));
        ctx.emit_event(GameEvent::new("B", json!(2)));
        let names: Vec<_> = ctx.take_events().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(ctx.take_events().is_empty());
    }

    #[test]
    fn clear_drops_pending_timers() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        ctx.spawn(Entity::new(id));
        let timer = ctx.timers.delayed_call(2.0);
        ctx.clear();
        assert!(!ctx.timers.is_pending(timer));
        assert!(ctx.scene.is_empty());
    }
}

#[cfg(test)]
#[cfg(feature = "physics")]
mod physics_tests {
    use super::*;
    use crate::core::physics::{BodyDesc, ColliderDesc, ColliderMaterial};

    #[test]
    fn spawn_with_body_creates_entity_and_physics() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        let entity = Entity::new(id).with_pos(Vec2::new(100.0, 200.0));
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 });

        ctx.spawn_with_body(entity, desc, ColliderMaterial::default());

        assert_eq!(ctx.scene.len(), 1);
        assert_eq!(ctx.physics.body_count(), 1);
        let body = ctx.scene.get(id).unwrap().body.unwrap();
        assert_eq!(ctx.physics.body_position(&body), Vec2::new(100.0, 200.0));
    }

    #[test]
    fn despawn_cleans_up_physics() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 });

        ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());
        assert_eq!(ctx.physics.body_count(), 1);

        ctx.despawn(id);
        assert_eq!(ctx.scene.len(), 0);
        assert_eq!(ctx.physics.body_count(), 0);
    }

    #[test]
    fn step_physics_syncs_positions() {
        let mut ctx = EngineContext::from_config(&GameConfig::default());
        let id = ctx.next_id();
        let entity = Entity::new(id).with_pos(Vec2::new(100.0, 100.0));
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 5.0 });
        ctx.spawn_with_body(entity, desc, ColliderMaterial::default());

        ctx.set_velocity(id, Vec2::new(60.0, 0.0));
        for _ in 0..10 {
            ctx.step_physics();
        }

        let x = ctx.scene.get(id).unwrap().pos.x;
        assert!((x - 110.0).abs() < 0.5, "x={x}");
    }

    #[test]
    fn set_position_moves_body_and_overlaps_follow() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        let rect = ColliderDesc::rect(Vec2::splat(32.0));
        ctx.spawn_with_body(
            Entity::new(a).with_pos(Vec2::new(100.0, 100.0)),
            BodyDesc::dynamic(rect).as_sensor(),
            ColliderMaterial::default(),
        );
        ctx.spawn_with_body(
            Entity::new(b).with_pos(Vec2::new(600.0, 400.0)),
            BodyDesc::fixed(rect).as_sensor(),
            ColliderMaterial::default(),
        );
        assert!(!ctx.overlaps(a, b));

        ctx.set_position(a, Vec2::new(590.0, 395.0));
        assert_eq!(ctx.scene.get(a).unwrap().pos, Vec2::new(590.0, 395.0));
        assert!(ctx.overlaps(a, b));
    }
}
