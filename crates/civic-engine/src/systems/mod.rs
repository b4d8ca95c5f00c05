pub mod animation;
pub mod hud;
pub mod pointer;
pub mod render;
