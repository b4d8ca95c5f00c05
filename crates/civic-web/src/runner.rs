use civic_engine::systems::render::build_render_buffer;
use civic_engine::{
    tick_animations, EngineContext, FixedTimestep, Game, GameConfig, GameEvent, HudState,
    InputEvent, InputQueue, RenderBuffer, RenderInstance, TextureSource,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game keeps a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]` (see [`crate::export_game!`]), because
/// wasm-bindgen cannot export generic structs directly. Nothing here touches
/// the browser, so tests drive it natively frame by frame.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
    shut_down: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        Self {
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            timestep: FixedTimestep::new(config.fixed_dt),
            config,
            game,
            initialized: false,
            shut_down: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.game.init(&mut self.ctx);
        self.initialized = true;
        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);
    }

    /// Queue an input event for the next frame that runs a fixed step.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.initialized && !self.shut_down {
            self.input.push(event);
        }
    }

    /// Run one frame: fixed steps of timers, game update, physics, tweens and
    /// animations, then rebuild the render buffer.
    ///
    /// Queued input is handed to the first step only. A frame too short to run
    /// any step keeps the queue for the next frame.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized || self.shut_down {
            return;
        }

        let steps = self.timestep.accumulate(dt);
        if steps > 0 {
            let step_dt = self.timestep.dt();
            let input = InputQueue::from(self.input.drain());
            let no_input = InputQueue::new();

            for step in 0..steps {
                self.ctx.timers.tick(step_dt);
                let frame_input = if step == 0 { &input } else { &no_input };
                self.game.update(&mut self.ctx, frame_input);
                #[cfg(feature = "physics")]
                self.ctx.step_physics();
                self.ctx.tweens.tick(step_dt, &mut self.ctx.scene);
                tick_animations(&mut self.ctx.scene, step_dt);
            }
        }

        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);
    }

    /// Tear the scene down. Pending timers are dropped, so nothing scheduled
    /// before shutdown ever fires. Idempotent.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        if self.initialized {
            self.game.teardown(&mut self.ctx);
        }
        self.ctx.clear();
        self.input.drain();
        self.render_buffer.clear();
        self.shut_down = true;
        log::info!("Game shut down");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Events and HUD ----

    /// Drain queued game events, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.ctx.take_events()
    }

    /// Drain queued game events as a JSON array.
    pub fn events_json(&mut self) -> String {
        let events = self.take_events();
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::warn!("Failed to serialize {} events: {e}", events.len());
            "[]".to_string()
        })
    }

    pub fn hud(&self) -> &HudState {
        &self.ctx.hud
    }

    pub fn hud_json(&self) -> String {
        self.ctx.hud.to_json()
    }

    // ---- Render buffer ----

    pub fn instances(&self) -> &[RenderInstance] {
        &self.render_buffer.instances
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn max_instances(&self) -> u32 {
        self.config.max_instances as u32
    }

    // ---- Textures, in atlas order ----

    pub fn texture_count(&self) -> u32 {
        self.ctx.assets.len() as u32
    }

    pub fn texture_key(&self, index: u32) -> Option<String> {
        self.ctx.assets.texture(index as usize).map(|t| t.key.clone())
    }

    /// URL for file-backed textures; `None` for generated ones.
    pub fn texture_path(&self, index: u32) -> Option<String> {
        match &self.ctx.assets.texture(index as usize)?.source {
            TextureSource::File(path) => Some(path.clone()),
            TextureSource::Generated(_) => None,
        }
    }

    /// Width, height and RGBA pixels of a generated texture.
    pub fn texture_pixels(&self, index: u32) -> Option<(u32, u32, &[u8])> {
        match &self.ctx.assets.texture(index as usize)?.source {
            TextureSource::Generated(data) => Some((data.width, data.height, &data.pixels)),
            TextureSource::File(_) => None,
        }
    }

    // ---- World ----

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    pub fn clear_color(&self) -> u32 {
        self.config.clear_color
    }
}
