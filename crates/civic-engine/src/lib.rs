pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod error;
pub mod extensions;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, FromRegistry, Game, GameConfig};
pub use api::types::{EntityId, GameEvent};
pub use assets::manifest::{AssetManifest, TextureDescriptor};
pub use assets::procedural::TextureData;
pub use assets::registry::{SpriteInfo, SpriteRegistry};
pub use assets::store::{AssetStore, AssetStrategy, LoadedTexture, TextureSource};
pub use components::animation::{AnimationComponent, AnimationDef};
pub use components::entity::Entity;
pub use components::sprite::{AtlasId, SpriteComponent};
pub use core::registry::Registry;
pub use core::rng::Rng;
pub use core::scene::Scene;
pub use core::time::{FixedTimestep, TimerId, Timers};
pub use error::{AssetError, RegistryError};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::instance::{RenderBuffer, RenderInstance};
pub use systems::animation::tick_animations;
pub use systems::hud::{HudState, Label};
pub use systems::pointer::{PointerAction, PointerSystem};

#[cfg(feature = "physics")]
pub use core::physics::{
    layers, BodyDesc, BodyType, ColliderDesc, ColliderMaterial, PhysicsBody, PhysicsWorld,
};

// Tweens
pub use extensions::{Tween, TweenId, TweenLoop, TweenState};
