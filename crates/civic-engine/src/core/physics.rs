use glam::Vec2;
use rapier2d::prelude::*;

use crate::api::types::EntityId;

// ---------------------------------------------------------------------------
// glam <-> nalgebra
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Fixed,
}

impl BodyType {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Fixed => RigidBodyType::Fixed,
        }
    }
}

/// Shape description for a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_width: f32, half_height: f32 },
}

impl ColliderDesc {
    /// Axis-aligned box covering `size` (full width/height).
    pub fn rect(size: Vec2) -> Self {
        ColliderDesc::Cuboid {
            half_width: size.x * 0.5,
            half_height: size.y * 0.5,
        }
    }

    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderDesc::Cuboid { half_width, half_height } => {
                ColliderBuilder::cuboid(half_width, half_height)
            }
        }
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.0,
            friction: 0.5,
            density: 1.0,
        }
    }
}

/// Collision layers. A contact happens only when each side's membership
/// intersects the other side's filter.
pub mod layers {
    /// World-bound walls.
    pub const BOUNDS: u32 = 1 << 0;
    /// Loose props (trash) that stay inside the world but ignore each other.
    pub const PROPS: u32 = 1 << 1;
    /// Everything.
    pub const ALL: u32 = u32::MAX;
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec2,
    pub fixed_rotation: bool,
    pub collider: ColliderDesc,
    /// Sensors detect overlap but never push other bodies.
    pub sensor: bool,
    /// `(memberships, filter)` bitmasks, see [`layers`].
    pub layers: (u32, u32),
}

impl BodyDesc {
    /// A dynamic body with rotation locked.
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec2::ZERO,
            fixed_rotation: true,
            collider,
            sensor: false,
            layers: (layers::ALL, layers::ALL),
        }
    }

    /// A fixed (static) body.
    pub fn fixed(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Fixed,
            ..Self::dynamic(collider)
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn as_sensor(mut self) -> Self {
        self.sensor = true;
        self
    }

    pub fn with_layers(mut self, memberships: u32, filter: u32) -> Self {
        self.layers = (memberships, filter);
        self
    }
}

/// Handle pair stored on an Entity, referencing Rapier internals.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps the Rapier2D pipeline for a top-down (zero gravity by default) scene.
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    bounds: Vec<PhysicsBody>,
}

impl PhysicsWorld {
    /// Create a new physics world with the given gravity vector (Y points down).
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            bounds: Vec::new(),
        }
    }

    /// Set the integration timestep.
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Create a rigid body + collider and return handles.
    /// The EntityId is stored in the body's `user_data`.
    pub fn create_body(
        &mut self,
        entity_id: EntityId,
        desc: &BodyDesc,
        material: ColliderMaterial,
    ) -> PhysicsBody {
        let rb = RigidBodyBuilder::new(desc.body_type.to_rapier())
            .translation(vec2_to_na(desc.position))
            .locked_axes(if desc.fixed_rotation {
                LockedAxes::ROTATION_LOCKED
            } else {
                LockedAxes::empty()
            })
            .user_data(entity_id.0 as u128)
            .build();

        let body_handle = self.bodies.insert(rb);

        let (memberships, filter) = desc.layers;
        let collider = desc
            .collider
            .build_collider()
            .sensor(desc.sensor)
            .collision_groups(InteractionGroups::new(
                Group::from_bits_truncate(memberships),
                Group::from_bits_truncate(filter),
            ))
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density)
            .build();

        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// Enclose `[0, width] x [0, height]` with fixed walls of the given thickness.
    /// Replaces any previously created bounds.
    pub fn set_world_bounds(&mut self, width: f32, height: f32, thickness: f32) {
        for body in std::mem::take(&mut self.bounds) {
            self.remove_body(&body);
        }
        let half_t = thickness * 0.5;
        let walls = [
            (Vec2::new(width * 0.5, -half_t), Vec2::new(width + thickness * 2.0, thickness)),
            (Vec2::new(width * 0.5, height + half_t), Vec2::new(width + thickness * 2.0, thickness)),
            (Vec2::new(-half_t, height * 0.5), Vec2::new(thickness, height + thickness * 2.0)),
            (Vec2::new(width + half_t, height * 0.5), Vec2::new(thickness, height + thickness * 2.0)),
        ];
        for (center, size) in walls {
            let desc = BodyDesc::fixed(ColliderDesc::rect(size))
                .with_position(center)
                .with_layers(layers::BOUNDS, layers::ALL);
            // Walls have no entity; u32::MAX never collides with a real id.
            let body = self.create_body(EntityId(u32::MAX), &desc, ColliderMaterial::default());
            self.bounds.push(body);
        }
    }

    /// Remove a body and all its colliders from the simulation.
    pub fn remove_body(&mut self, body: &PhysicsBody) {
        self.bodies.remove(
            body.body_handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Advance the simulation one step.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Set the linear velocity of a body.
    pub fn set_velocity(&mut self, body: &PhysicsBody, vel: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_linvel(vec2_to_na(vel), true);
        }
    }

    /// Get the linear velocity of a body.
    pub fn velocity(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Teleport a body and stop it. Used for pointer drags and arrival snaps,
    /// where the pointer, not the solver, owns the position.
    pub fn reset_body(&mut self, body: &PhysicsBody, pos: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_translation(vec2_to_na(pos), true);
            rb.set_linvel(nalgebra::Vector2::zeros(), true);
        }
    }

    /// Current position of a body.
    pub fn body_position(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.translation()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Whether the colliders of two bodies overlap right now.
    ///
    /// Uses the bodies' current poses, so a teleport done this frame is
    /// visible before the next `step`.
    pub fn intersects(&self, a: &PhysicsBody, b: &PhysicsBody) -> bool {
        let (Some(rb_a), Some(rb_b)) = (
            self.bodies.get(a.body_handle),
            self.bodies.get(b.body_handle),
        ) else {
            return false;
        };
        let (Some(col_a), Some(col_b)) = (
            self.colliders.get(a.collider_handle),
            self.colliders.get(b.collider_handle),
        ) else {
            return false;
        };
        rapier2d::parry::query::intersection_test(
            rb_a.position(),
            col_a.shape(),
            rb_b.position(),
            col_b.shape(),
        )
        .unwrap_or(false)
    }

    /// Number of rigid bodies in the simulation, walls included.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Drop every body, walls included.
    pub fn clear(&mut self) {
        let gravity = na_to_vec2(&self.gravity);
        let dt = self.integration_parameters.dt;
        *self = Self::new(gravity);
        self.set_dt(dt);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> PhysicsWorld {
        let mut w = PhysicsWorld::new(Vec2::ZERO);
        w.set_dt(1.0 / 60.0);
        w
    }

    #[test]
    fn create_and_remove_body() {
        let mut w = world();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 });
        let body = w.create_body(EntityId(1), &desc, ColliderMaterial::default());
        assert_eq!(w.body_count(), 1);
        w.remove_body(&body);
        assert_eq!(w.body_count(), 0);
    }

    #[test]
    fn velocity_integrates_position() {
        let mut w = world();
        let desc = BodyDesc::dynamic(ColliderDesc::rect(Vec2::splat(32.0)))
            .with_position(Vec2::new(400.0, 300.0))
            .as_sensor();
        let body = w.create_body(EntityId(1), &desc, ColliderMaterial::default());
        w.set_velocity(&body, Vec2::new(120.0, 0.0));

        for _ in 0..60 {
            w.step();
        }

        let pos = w.body_position(&body);
        assert!((pos.x - 520.0).abs() < 1.0, "x was {}", pos.x);
        assert!((pos.y - 300.0).abs() < 0.01);
    }

    #[test]
    fn reset_body_teleports_and_stops() {
        let mut w = world();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 5.0 });
        let body = w.create_body(EntityId(1), &desc, ColliderMaterial::default());
        w.set_velocity(&body, Vec2::new(50.0, 50.0));

        w.reset_body(&body, Vec2::new(10.0, 20.0));
        assert_eq!(w.body_position(&body), Vec2::new(10.0, 20.0));
        assert_eq!(w.velocity(&body), Vec2::ZERO);
    }

    #[test]
    fn intersects_follows_teleports() {
        let mut w = world();
        let bin = w.create_body(
            EntityId(1),
            &BodyDesc::fixed(ColliderDesc::rect(Vec2::splat(64.0)))
                .with_position(Vec2::new(600.0, 400.0))
                .as_sensor(),
            ColliderMaterial::default(),
        );
        let trash = w.create_body(
            EntityId(2),
            &BodyDesc::dynamic(ColliderDesc::rect(Vec2::splat(32.0)))
                .with_position(Vec2::new(200.0, 300.0)),
            ColliderMaterial::default(),
        );
        assert!(!w.intersects(&trash, &bin));

        w.reset_body(&trash, Vec2::new(580.0, 410.0));
        assert!(w.intersects(&trash, &bin));
    }

    #[test]
    fn fixed_body_does_not_move() {
        let mut w = PhysicsWorld::new(Vec2::new(0.0, 981.0));
        w.set_dt(1.0 / 60.0);
        let body = w.create_body(
            EntityId(1),
            &BodyDesc::fixed(ColliderDesc::rect(Vec2::splat(10.0))).with_position(Vec2::new(5.0, 5.0)),
            ColliderMaterial::default(),
        );
        for _ in 0..30 {
            w.step();
        }
        assert_eq!(w.body_position(&body), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn world_bounds_are_replaced_not_stacked() {
        let mut w = world();
        w.set_world_bounds(800.0, 600.0, 20.0);
        w.set_world_bounds(800.0, 600.0, 20.0);
        assert_eq!(w.body_count(), 4);
        w.clear();
        assert_eq!(w.body_count(), 0);
    }
}
