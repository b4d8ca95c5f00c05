//! The mission scene: one mission's play field, scoring and completion report.

use civic_engine::{
    layers, AnimationComponent, AnimationDef, AssetError, BodyDesc, ColliderDesc, ColliderMaterial,
    EngineContext, Entity, EntityId, FromRegistry, Game, GameConfig, GameEvent, InputQueue,
    PointerAction, PointerSystem, Registry, Rng, SpriteComponent, SpriteInfo, TimerId, Tween,
    TweenLoop,
};
use glam::Vec2;

use crate::level::{Level, ScoreProgress};
use crate::mission::{reward_payload, MissionContext, ScoreReward};
use crate::sprites;

/// Name of the event carrying the reward to the host.
pub const MISSION_COMPLETE: &str = "MISSION_COMPLETE";

const WORLD_W: f32 = 800.0;
const WORLD_H: f32 = 600.0;
const SKY_BLUE: u32 = 0x87CEEB;
const WALL_THICKNESS: f32 = 32.0;

const PLAYER_START: Vec2 = Vec2::new(400.0, 300.0);
const WALK_SPEED: f32 = 120.0;
const ARRIVE_DISTANCE: f32 = 4.0;

const NPC_START: Vec2 = Vec2::new(200.0, 200.0);
const NPC_WANDER_TO_X: f32 = 250.0;
const NPC_WANDER_SECS: f32 = 2.0;

const PROP_SCALE: f32 = 2.0;
const TAP_TRASH_POS: Vec2 = Vec2::new(500.0, 400.0);
const BIN_POS: Vec2 = Vec2::new(600.0, 400.0);
const TRASH_X_RANGE: (i32, i32) = (100, 400);
const TRASH_Y_RANGE: (i32, i32) = (200, 500);

const REPORT_DELAY_SECS: f32 = 2.0;
const HAPPY_LABEL_OFFSET: Vec2 = Vec2::new(-40.0, -80.0);
const HAPPY_LABEL_COLOR: &str = "#10b981";

mod text {
    pub const COMPLETE: &str = "MISSION COMPLETE!\nSending Score...";
    pub const REPORTED: &str = "Score updated! Click EXIT to return.";
    pub const HAPPY_EARTH: &str = "Happy Earth!";
}

mod anim {
    pub const IDLE: &str = "idle";
    pub const WALK: &str = "walk";
}

/// Where the scene is in reporting its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    InProgress,
    /// Target reached; the report goes out when `timer` fires.
    Announced { timer: TimerId },
    /// The completion event has been emitted.
    Reported,
}

pub struct MissionScene {
    context: MissionContext,
    level: Level,
    reward: ScoreReward,
    progress: ScoreProgress,
    completion: Completion,
    pointer: PointerSystem,
    rng: Rng,
    player: Option<EntityId>,
    npc: Option<EntityId>,
    bin: Option<EntityId>,
    trash: Vec<EntityId>,
    move_target: Option<Vec2>,
}

impl MissionScene {
    pub fn new(context: MissionContext) -> Self {
        let level = Level::from_number(context.level());
        let seed = context.options.seed();
        log::debug!("Trash layout seed {seed:#x}");
        Self {
            reward: context.reward(),
            progress: ScoreProgress::new(level.max_score()),
            completion: Completion::InProgress,
            pointer: PointerSystem::new(),
            rng: Rng::new(seed),
            player: None,
            npc: None,
            bin: None,
            trash: Vec::new(),
            move_target: None,
            level,
            context,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn progress(&self) -> ScoreProgress {
        self.progress
    }

    pub fn completion(&self) -> Completion {
        self.completion
    }

    pub fn reward(&self) -> &ScoreReward {
        &self.reward
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    pub fn npc(&self) -> Option<EntityId> {
        self.npc
    }

    pub fn bin(&self) -> Option<EntityId> {
        self.bin
    }

    /// Trash still in play.
    pub fn trash(&self) -> &[EntityId] {
        &self.trash
    }

    pub fn move_target(&self) -> Option<Vec2> {
        self.move_target
    }

    // -- Setup --

    fn spawn_player(&mut self, ctx: &mut EngineContext) {
        let (sprite, size) = sprite_for(ctx, sprites::PLAYER, 1.0);
        let mut animation = AnimationComponent::new()
            .with(anim::IDLE, AnimationDef::still(0))
            .with(anim::WALK, AnimationDef::strip(0, 3, 8.0));
        animation.play(anim::IDLE);

        let id = ctx.next_id();
        let entity = Entity::new(id)
            .with_tag("player")
            .with_pos(PLAYER_START)
            .with_size(size)
            .with_sprite(sprite)
            .with_animation(animation);
        // Props never push each other; only the walls stop the player.
        let desc = BodyDesc::dynamic(ColliderDesc::rect(size)).with_layers(layers::PROPS, layers::BOUNDS);
        ctx.spawn_with_body(entity, desc, ColliderMaterial::default());
        self.player = Some(id);
    }

    fn spawn_npc(&mut self, ctx: &mut EngineContext) {
        let (sprite, size) = sprite_for(ctx, sprites::NPC, 1.0);
        let mut animation = AnimationComponent::new().with(anim::WALK, AnimationDef::yoyo(0, 3, 6.0));
        animation.play(anim::WALK);

        let id = ctx.next_id();
        ctx.spawn(
            Entity::new(id)
                .with_tag("npc")
                .with_pos(NPC_START)
                .with_size(size)
                .with_sprite(sprite)
                .with_animation(animation),
        );
        ctx.tweens.add(
            id,
            Tween::position_x(NPC_START.x, NPC_WANDER_TO_X, NPC_WANDER_SECS).with_loop(TweenLoop::PingPong),
        );
        self.npc = Some(id);
    }

    fn setup_tap_trash(&mut self, ctx: &mut EngineContext) {
        let (sprite, size) = sprite_for(ctx, sprites::TRASH, PROP_SCALE);
        let id = ctx.next_id();
        ctx.spawn(
            Entity::new(id)
                .with_tag("trash")
                .with_pos(TAP_TRASH_POS)
                .with_size(size)
                .with_sprite(sprite)
                .interactive(),
        );
        self.trash.push(id);
    }

    fn setup_drag_to_bin(&mut self, ctx: &mut EngineContext) {
        let (sprite, size) = sprite_for(ctx, sprites::BIN, PROP_SCALE);
        let bin = ctx.next_id();
        ctx.spawn_with_body(
            Entity::new(bin)
                .with_tag("bin")
                .with_pos(BIN_POS)
                .with_size(size)
                .with_sprite(sprite),
            BodyDesc::fixed(ColliderDesc::rect(size)).as_sensor(),
            ColliderMaterial::default(),
        );
        self.bin = Some(bin);

        let (sprite, size) = sprite_for(ctx, sprites::TRASH, PROP_SCALE);
        for _ in 0..self.level.max_score() {
            let x = self.rng.between(TRASH_X_RANGE.0, TRASH_X_RANGE.1);
            let y = self.rng.between(TRASH_Y_RANGE.0, TRASH_Y_RANGE.1);
            let id = ctx.next_id();
            ctx.spawn_with_body(
                Entity::new(id)
                    .with_tag("trash")
                    .with_pos(Vec2::new(x as f32, y as f32))
                    .with_size(size)
                    .with_sprite(sprite.clone())
                    .draggable(),
                BodyDesc::dynamic(ColliderDesc::rect(size)).with_layers(layers::PROPS, layers::BOUNDS),
                ColliderMaterial::default(),
            );
            self.trash.push(id);
        }
    }

    // -- Input --

    fn handle_pointer(&mut self, ctx: &mut EngineContext, action: PointerAction) {
        match action {
            PointerAction::Pressed { entity, .. } => {
                if self.level == Level::TapTrash && self.trash.contains(&entity) {
                    self.collect(ctx, entity);
                }
            }
            PointerAction::PressedEmpty { pos } => {
                if self.context.options.tap_to_move {
                    self.walk_to(ctx, pos);
                }
            }
            PointerAction::Dragged { entity, pos } => {
                if self.trash.contains(&entity) {
                    ctx.set_position(entity, pos);
                }
            }
            PointerAction::Released { .. } => {}
        }
    }

    fn walk_to(&mut self, ctx: &mut EngineContext, target: Vec2) {
        let Some(player) = self.player else {
            return;
        };
        let Some((pos, size)) = ctx.scene.get(player).map(|e| (e.pos, e.size)) else {
            return;
        };
        // Keep the target reachable: the walls stop the player's box at its half size.
        let half = size * 0.5;
        let target = target.clamp(half, Vec2::new(WORLD_W, WORLD_H) - half);

        ctx.set_velocity(player, (target - pos).normalize_or_zero() * WALK_SPEED);
        if let Some(entity) = ctx.scene.get_mut(player) {
            if let Some(animation) = entity.animation.as_mut() {
                animation.play_if_different(anim::WALK);
            }
            if let Some(sprite) = entity.sprite.as_mut() {
                sprite.flip_x = target.x < pos.x;
            }
        }
        self.move_target = Some(target);
    }

    fn update_walk(&mut self, ctx: &mut EngineContext) {
        let (Some(player), Some(target)) = (self.player, self.move_target) else {
            return;
        };
        let Some(pos) = ctx.scene.get(player).map(|e| e.pos) else {
            return;
        };
        if pos.distance(target) < ARRIVE_DISTANCE {
            ctx.set_position(player, target);
            if let Some(animation) = ctx.scene.get_mut(player).and_then(|e| e.animation.as_mut()) {
                animation.play_if_different(anim::IDLE);
            }
            self.move_target = None;
        }
    }

    // -- Scoring --

    fn collect_binned_trash(&mut self, ctx: &mut EngineContext) {
        let Some(bin) = self.bin else {
            return;
        };
        let binned: Vec<EntityId> = self
            .trash
            .iter()
            .copied()
            .filter(|&trash| ctx.overlaps(trash, bin))
            .collect();
        for trash in binned {
            self.collect(ctx, trash);
        }
    }

    /// Destroy a piece of trash and count it. Each piece counts once.
    fn collect(&mut self, ctx: &mut EngineContext, trash: EntityId) {
        let before = self.trash.len();
        self.trash.retain(|&t| t != trash);
        if self.trash.len() == before {
            return;
        }
        let tag = ctx.scene.get(trash).map(|e| e.tag.clone()).unwrap_or_default();
        ctx.despawn(trash);

        let complete = self.progress.record();
        log::debug!("Collected {tag} {:?}: {}/{}", trash, self.progress.earned(), self.progress.max());
        if complete && self.completion == Completion::InProgress {
            self.announce(ctx);
        }
    }

    fn announce(&mut self, ctx: &mut EngineContext) {
        ctx.hud.set_message(text::COMPLETE);
        let bin_pos = self.bin.and_then(|id| ctx.scene.get(id)).map(|e| e.pos);
        if let Some(pos) = bin_pos {
            ctx.hud.add_label(text::HAPPY_EARTH, pos + HAPPY_LABEL_OFFSET, HAPPY_LABEL_COLOR);
        }
        let timer = ctx.timers.delayed_call(REPORT_DELAY_SECS);
        self.completion = Completion::Announced { timer };
        log::info!("Mission complete, reporting in {REPORT_DELAY_SECS}s");
    }

    fn poll_timers(&mut self, ctx: &mut EngineContext) {
        for fired in ctx.timers.take_fired() {
            if self.completion != (Completion::Announced { timer: fired }) {
                continue;
            }
            ctx.emit_event(GameEvent::new(MISSION_COMPLETE, reward_payload(&self.reward)));
            ctx.hud.set_message(text::REPORTED);
            self.completion = Completion::Reported;
        }
    }
}

/// Sprite and on-screen size for a texture key, scaled from its frame size.
fn sprite_for(ctx: &EngineContext, key: &str, scale: f32) -> (SpriteComponent, Vec2) {
    match sprite_info(ctx, key) {
        Ok(info) => (SpriteComponent::new(info.atlas), info.frame_size * scale),
        Err(e) => {
            log::warn!("{e}; drawing a default sprite");
            (SpriteComponent::default(), Vec2::splat(32.0 * scale))
        }
    }
}

fn sprite_info(ctx: &EngineContext, key: &str) -> Result<SpriteInfo, AssetError> {
    ctx.assets
        .registry()
        .info(key)
        .copied()
        .ok_or_else(|| AssetError::UnknownTexture(key.to_string()))
}

impl FromRegistry for MissionScene {
    fn from_registry(registry: &Registry) -> Self {
        Self::new(MissionContext::from_registry(registry))
    }
}

impl Game for MissionScene {
    fn config(&self) -> GameConfig {
        GameConfig {
            world_width: WORLD_W,
            world_height: WORLD_H,
            clear_color: SKY_BLUE,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        ctx.load_assets(&sprites::manifest(), self.context.options.asset_strategy);
        ctx.physics.set_world_bounds(WORLD_W, WORLD_H, WALL_THICKNESS);
        ctx.hud
            .set_title(format!("CIVIC MISSION\n{}", self.context.display_title()));

        self.spawn_player(ctx);
        self.spawn_npc(ctx);
        match self.level {
            Level::TapTrash => self.setup_tap_trash(ctx),
            Level::DragToBin => self.setup_drag_to_bin(ctx),
            Level::Unsupported(n) => log::info!("Level {n} has no mission content yet"),
        }
        ctx.hud.set_message(self.level.instructions());

        log::info!(
            "Mission '{}' ready: {:?}, target {}",
            self.context.display_title(),
            self.level,
            self.progress.max()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.poll_timers(ctx);

        for event in input.iter() {
            if let Some(action) = self.pointer.handle(event, &ctx.scene) {
                self.handle_pointer(ctx, action);
            }
        }

        if self.level == Level::DragToBin {
            self.collect_binned_trash(ctx);
        }
        self.update_walk(ctx);
    }

    fn teardown(&mut self, ctx: &mut EngineContext) {
        if let Completion::Announced { timer } = self.completion {
            ctx.timers.cancel(timer);
            log::info!("Scene closed before its score was reported");
        }
        self.pointer.reset();
        self.move_target = None;
        self.trash.clear();
        self.player = None;
        self.npc = None;
        self.bin = None;
    }
}
