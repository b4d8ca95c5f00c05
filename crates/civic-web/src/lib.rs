pub mod runner;

pub use runner::GameRunner;

// Re-exported so `export_game!` expands without extra dependencies in the game crate.
pub use civic_engine;
pub use js_sys;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// This macro generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, pointer handlers,
///   game_shutdown, event/HUD/texture/render accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod scene;
/// use scene::MissionScene;
///
/// civic_web::export_game!(MissionScene, "civic-sense");
/// ```
///
/// # Arguments
///
/// - `$game_type`: a type implementing `civic_engine::Game` and `civic_engine::FromRegistry`
/// - `$game_name`: a string literal used in log messages
///
/// Every export is a no-op (or returns an empty value) before `game_init`.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
        }

        /// Boot the game from the host-filled registry (a JSON object).
        #[wasm_bindgen]
        pub fn game_init(registry_json: &str) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let registry = match $crate::civic_engine::Registry::from_json(registry_json) {
                Ok(registry) => registry,
                Err(e) => {
                    log::warn!("{}: unreadable registry, starting empty: {e}", $game_name);
                    let mut registry = $crate::civic_engine::Registry::new();
                    registry.freeze();
                    registry
                }
            };

            let game = <$game_type as $crate::civic_engine::FromRegistry>::from_registry(&registry);
            let mut runner = $crate::GameRunner::new(game);
            runner.init();

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::civic_engine::InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::civic_engine::InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::civic_engine::InputEvent::PointerMove { x, y }));
        }

        /// Tear the scene down and drop the runner.
        #[wasm_bindgen]
        pub fn game_shutdown() {
            with_runner(|r| r.shutdown());
            RUNNER.with(|cell| cell.borrow_mut().take());
            log::info!("{}: shut down", $game_name);
        }

        // ---- Events and HUD ----

        /// Drain queued game events as a JSON array of `{name, payload}`.
        #[wasm_bindgen]
        pub fn game_events_json() -> String {
            with_runner(|r| r.events_json()).unwrap_or_else(|| "[]".to_string())
        }

        #[wasm_bindgen]
        pub fn hud_json() -> String {
            with_runner(|r| r.hud_json()).unwrap_or_default()
        }

        // ---- Render instances ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances()).unwrap_or(0)
        }

        // ---- Textures ----

        #[wasm_bindgen]
        pub fn get_texture_count() -> u32 {
            with_runner(|r| r.texture_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_texture_key(index: u32) -> Option<String> {
            with_runner(|r| r.texture_key(index)).flatten()
        }

        #[wasm_bindgen]
        pub fn get_texture_path(index: u32) -> Option<String> {
            with_runner(|r| r.texture_path(index)).flatten()
        }

        #[wasm_bindgen]
        pub fn get_texture_width(index: u32) -> u32 {
            with_runner(|r| r.texture_pixels(index).map(|(w, _, _)| w)).flatten().unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_texture_height(index: u32) -> u32 {
            with_runner(|r| r.texture_pixels(index).map(|(_, h, _)| h)).flatten().unwrap_or(0)
        }

        /// RGBA8 pixels of a generated texture (empty for file-backed ones).
        #[wasm_bindgen]
        pub fn get_texture_pixels(index: u32) -> $crate::js_sys::Uint8Array {
            with_runner(|r| match r.texture_pixels(index) {
                Some((_, _, pixels)) => $crate::js_sys::Uint8Array::from(pixels),
                None => $crate::js_sys::Uint8Array::new_with_length(0),
            })
            .unwrap_or_else(|| $crate::js_sys::Uint8Array::new_with_length(0))
        }

        // ---- World ----

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height()).unwrap_or(0.0)
        }

        /// Background colour as 0xRRGGBB.
        #[wasm_bindgen]
        pub fn get_clear_color() -> u32 {
            with_runner(|r| r.clear_color()).unwrap_or(0)
        }
    };
}
