//! Heads-up text state.
//!
//! Text is not rasterized here: the host draws the message and labels as an
//! overlay, reading them as JSON once per frame.

use glam::Vec2;
use serde::Serialize;

/// A piece of text pinned to a world position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub x: f32,
    pub y: f32,
    /// CSS colour string, e.g. `#10b981`.
    pub color: String,
}

/// The scene's title, status message and any world labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudState {
    pub title: String,
    pub message: String,
    pub labels: Vec<Label>,
}

impl HudState {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            message: message.into(),
            labels: Vec::new(),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn add_label(&mut self, text: impl Into<String>, pos: Vec2, color: impl Into<String>) {
        self.labels.push(Label {
            text: text.into(),
            x: pos.x,
            y: pos.y,
            color: color.into(),
        });
    }

    pub fn to_json(&self) -> String {
        // Only strings and floats; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.message.clear();
        self.labels.clear();
    }
}

impl Default for HudState {
    fn default() -> Self {
        Self::new("Loading...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_loading() {
        assert_eq!(HudState::default().message, "Loading...");
    }

    #[test]
    fn json_carries_message_and_labels() {
        let mut hud = HudState::new("hi");
        hud.add_label("Happy Earth!", Vec2::new(560.0, 320.0), "#10b981");
        assert_eq!(
            hud.to_json(),
            r##"{"title":"","message":"hi","labels":[{"text":"Happy Earth!","x":560.0,"y":320.0,"color":"#10b981"}]}"##
        );
    }
}
