#[cfg(feature = "physics")]
pub mod physics;
pub mod registry;
pub mod rng;
pub mod scene;
pub mod time;
