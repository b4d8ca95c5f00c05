//! Opt-in systems that work on the scene from the outside. The engine
//! context owns one `TweenState`; games add tweens through it.

pub mod tween;

pub use tween::{Tween, TweenId, TweenLoop, TweenState};
